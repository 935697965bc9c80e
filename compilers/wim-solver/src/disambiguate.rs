use crate::knowledge::FrameTemplate;

/// Index of the preferred template: the first with the longest role
/// template, where an unscoped template takes over a tie from a scoped one.
pub fn select<'t>(templates: impl IntoIterator<Item = &'t FrameTemplate>) -> Option<usize> {
    let mut best: Option<(usize, &FrameTemplate)> = None;

    for (index, candidate) in templates.into_iter().enumerate() {
        let replace = match best {
            None => true,
            Some((_, current)) => {
                let (len, current_len) = (candidate.role_template.len(), current.role_template.len());
                len > current_len
                    || (len == current_len && current.is_scoped() && !candidate.is_scoped())
            }
        };
        if replace {
            best = Some((index, candidate));
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use wim_parser::parse_pattern;

    fn template(roles: &str) -> FrameTemplate {
        FrameTemplate::new("Somebody ----s", parse_pattern("(CL (NP) (VP=head))").unwrap(), roles)
    }

    #[test]
    fn test_longest_wins_regardless_of_order() {
        let short = template("AGENT X");
        let long = template("AGENT X THEME");

        assert_eq!(select([&short, &long]), Some(1));
        assert_eq!(select([&long, &short]), Some(0));
    }

    #[test]
    fn test_scope_loses_ties() {
        let scoped = template("AGENT X SCOPE");
        let plain = template("AGENT X THEME");
        let other = template("AGENT X PATIENT");

        assert_eq!(select([&scoped, &plain]), Some(1));
        assert_eq!(select([&plain, &scoped]), Some(0));
        // first unscoped template stays
        assert_eq!(select([&scoped, &plain, &other]), Some(1));
    }

    #[test]
    fn test_nothing_to_pick() {
        assert_eq!(select(Vec::<&FrameTemplate>::new()), None);

        let empty = template("");
        assert_eq!(select([&empty]), Some(0));
    }

    proptest! {
        #[test]
        fn test_selected_is_a_longest(lengths in prop::collection::vec(0usize..6, 1..8)) {
            let templates: Vec<FrameTemplate> = lengths
                .iter()
                .map(|n| template(&vec!["ROLE"; *n].join(" ")))
                .collect();

            let chosen = select(templates.iter()).unwrap();
            let longest = lengths.iter().copied().max().unwrap();
            prop_assert_eq!(lengths[chosen], longest);
            prop_assert_eq!(chosen, lengths.iter().position(|n| *n == longest).unwrap());
        }
    }
}
