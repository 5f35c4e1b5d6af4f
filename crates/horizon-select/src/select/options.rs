//! Option derivation.
//!
//! [`derive_menu_options`] turns the raw option list, the search text and the
//! current selection into the indexed rows the menu renders. It is a pure
//! function: the engine re-runs it whenever one of its inputs changes.

use horizon_select_core::logging::targets;

use super::types::{Accessors, MenuOption, OptionValue, SelectedOption};

/// Derive the renderable option rows.
///
/// Rows keep the raw list's relative order and are re-indexed `0..len`.
/// With `hide_selected`, options whose value is selected are dropped. A
/// non-empty `search` keeps only options whose filter string contains it,
/// ignoring case unless `case_sensitive` is set.
pub fn derive_menu_options<T: Clone>(
    options: &[T],
    search: &str,
    hide_selected: bool,
    selected: &[SelectedOption<T>],
    accessors: &Accessors<T>,
    case_sensitive: bool,
) -> Vec<MenuOption<T>> {
    let is_selected = |value: &OptionValue| selected.iter().any(|s| &s.value == value);
    let needle = if case_sensitive {
        search.to_string()
    } else {
        search.to_lowercase()
    };

    let menu_options: Vec<MenuOption<T>> = options
        .iter()
        .filter_map(|data| {
            let value = accessors.value(data);
            let selected = is_selected(&value);
            if hide_selected && selected {
                return None;
            }

            let label = accessors.label(data);
            if !needle.is_empty() {
                let haystack = accessors.filter_string(data, &label);
                let matches = if case_sensitive {
                    haystack.contains(&needle)
                } else {
                    haystack.to_lowercase().contains(&needle)
                };
                if !matches {
                    return None;
                }
            }

            Some((data, value, label, selected))
        })
        .enumerate()
        .map(|(index, (data, value, label, is_selected))| MenuOption {
            index,
            is_disabled: accessors.is_disabled(data),
            data: data.clone(),
            value,
            label,
            is_selected,
        })
        .collect();

    tracing::trace!(
        target: targets::OPTIONS,
        raw = options.len(),
        derived = menu_options.len(),
        search,
        "menu options derived"
    );
    menu_options
}

/// Normalize an initial value into a selection.
///
/// Multi mode keeps the first occurrence of each value; single mode keeps
/// only the first option.
pub fn normalize_value<T>(
    initial: Vec<T>,
    is_multi: bool,
    accessors: &Accessors<T>,
) -> Vec<SelectedOption<T>> {
    let mut selection: Vec<SelectedOption<T>> = Vec::new();
    for data in initial {
        let option = accessors.to_selected(data);
        if selection.iter().any(|s| s.value == option.value) {
            continue;
        }
        selection.push(option);
        if !is_multi {
            break;
        }
    }
    selection
}

/// Validate candidates handed to an imperative set-value call.
///
/// A candidate is accepted only if its value appears in the current derived
/// rows. Rejected candidates are dropped without error, so the result may be
/// empty. Uniqueness and the single-mode limit are enforced as in
/// [`normalize_value`].
pub fn validate_candidates<T: Clone>(
    candidates: Vec<T>,
    menu_options: &[MenuOption<T>],
    is_multi: bool,
    accessors: &Accessors<T>,
) -> Vec<SelectedOption<T>> {
    let valid: Vec<T> = candidates
        .into_iter()
        .filter(|data| {
            let value = accessors.value(data);
            let known = menu_options.iter().any(|option| option.value == value);
            if !known {
                tracing::debug!(target: targets::OPTIONS, %value, "rejected set-value candidate");
            }
            known
        })
        .collect();
    normalize_value(valid, is_multi, accessors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::types::SelectItem;

    fn fruits() -> Vec<SelectItem> {
        vec![
            SelectItem::new(1, "Apple"),
            SelectItem::new(2, "Banana"),
            SelectItem::new(3, "Cherry"),
            SelectItem::new(4, "Blackberry"),
        ]
    }

    fn derive(
        search: &str,
        hide: bool,
        selected: &[SelectedOption<SelectItem>],
    ) -> Vec<MenuOption<SelectItem>> {
        let accessors = Accessors::default();
        derive_menu_options(&fruits(), search, hide, selected, &accessors, false)
    }

    fn values(options: &[MenuOption<SelectItem>]) -> Vec<OptionValue> {
        options.iter().map(|o| o.value.clone()).collect()
    }

    fn ids(values: &[i64]) -> Vec<OptionValue> {
        values.iter().map(|&v| OptionValue::from(v)).collect()
    }

    #[test]
    fn test_search_filter_scenario() {
        let options = vec![SelectItem::new(1, "Apple"), SelectItem::new(2, "Banana")];
        let accessors = Accessors::default();
        let derived = derive_menu_options(&options, "an", false, &[], &accessors, false);

        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].index, 0);
        assert_eq!(derived[0].value, OptionValue::Int(2));
        assert_eq!(derived[0].label, "Banana");
    }

    #[test]
    fn test_empty_search_keeps_everything() {
        let derived = derive("", false, &[]);
        assert_eq!(derived.len(), 4);
        let indexes: Vec<usize> = derived.iter().map(|o| o.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_case_folding() {
        let folded = derive("b", false, &[]);
        assert_eq!(values(&folded), ids(&[2, 4]));

        let accessors = Accessors::default();
        let strict = derive_menu_options(&fruits(), "b", false, &[], &accessors, true);
        assert_eq!(values(&strict), ids(&[4]));
    }

    #[test]
    fn test_hide_selected_and_reindex() {
        let selected = vec![SelectItem::new(2, "Banana")]
            .into_iter()
            .map(|item| Accessors::default().to_selected(item))
            .collect::<Vec<_>>();

        let hidden = derive("", true, &selected);
        assert_eq!(values(&hidden), ids(&[1, 3, 4]));
        let indexes: Vec<usize> = hidden.iter().map(|o| o.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert!(hidden.iter().all(|o| !o.is_selected));

        let shown = derive("", false, &selected);
        assert_eq!(shown.len(), 4);
        assert!(shown[1].is_selected);
        assert!(!shown[0].is_selected);
    }

    #[test]
    fn test_pure_subset_contiguous() {
        let accessors = Accessors::default();
        let selected = normalize_value(vec![SelectItem::new(3, "Cherry")], true, &accessors);
        let raw: Vec<OptionValue> = fruits().iter().map(|f| f.value.clone()).collect();

        for search in ["", "a", "rr", "BERRY", "zzz"] {
            for hide in [false, true] {
                let first = derive(search, hide, &selected);
                let second = derive(search, hide, &selected);
                assert_eq!(first, second);

                let indexes: Vec<usize> = first.iter().map(|o| o.index).collect();
                assert_eq!(indexes, (0..first.len()).collect::<Vec<_>>());

                // Order-preserving subset of the raw values.
                let mut cursor = raw.iter();
                for value in values(&first) {
                    let found = cursor.any(|v| *v == value);
                    assert!(found, "{value} out of order for {search:?}");
                }
            }
        }
    }

    #[test]
    fn test_disabled_predicate_and_filter_string() {
        let accessors = Accessors::<SelectItem>::default()
            .with_is_option_disabled(|item| item.label.starts_with('C'))
            .with_filter_option_string(|item| format!("fruit-{}", item.value));

        let derived = derive_menu_options(&fruits(), "fruit-3", false, &[], &accessors, false);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].label, "Cherry");
        assert!(derived[0].is_disabled);
    }

    #[test]
    fn test_empty_options() {
        let accessors = Accessors::default();
        let derived = derive_menu_options::<SelectItem>(&[], "a", true, &[], &accessors, false);
        assert!(derived.is_empty());
    }

    #[test]
    fn test_normalize_value() {
        let accessors = Accessors::default();
        let initial = vec![
            SelectItem::new(1, "Apple"),
            SelectItem::new(1, "Apple again"),
            SelectItem::new(2, "Banana"),
        ];

        let multi = normalize_value(initial.clone(), true, &accessors);
        let labels: Vec<&str> = multi.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Apple", "Banana"]);

        let single = normalize_value(initial, false, &accessors);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].value, OptionValue::Int(1));

        assert!(normalize_value(Vec::new(), false, &accessors).is_empty());
    }

    #[test]
    fn test_validate_candidates() {
        let accessors = Accessors::default();
        let menu = derive("", false, &[]);

        let cherry = vec![SelectItem::new(3, "Cherry")];
        let accepted = validate_candidates(cherry, &menu, false, &accessors);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].value, OptionValue::Int(3));

        let mango = vec![SelectItem::new(99, "Mango")];
        let rejected = validate_candidates(mango, &menu, false, &accessors);
        assert!(rejected.is_empty());

        let candidates = vec![
            SelectItem::new(99, "Mango"),
            SelectItem::new(4, "Blackberry"),
            SelectItem::new(1, "Apple"),
        ];
        let mixed = validate_candidates(candidates, &menu, true, &accessors);
        let kept: Vec<OptionValue> = mixed.iter().map(|s| s.value.clone()).collect();
        assert_eq!(kept, ids(&[4, 1]));
    }
}
