use crate::models::Domain;

/// Keyword table driving [`DomainClassifier`].
///
/// Rules are kept in priority order: when two domains tie on hit count the
/// one listed first wins. Keywords are stored lower-cased.
#[derive(Debug, Clone)]
pub struct DomainTaxonomy {
    rules: Vec<(Domain, Vec<String>)>,
}

impl DomainTaxonomy {
    pub fn new<I, K>(rules: I) -> Self
    where
        I: IntoIterator<Item = (Domain, K)>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        let rules = rules
            .into_iter()
            .filter(|(domain, _)| *domain != Domain::Other)
            .map(|(domain, keywords)| {
                let keywords = keywords
                    .into_iter()
                    .map(|k| k.as_ref().trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (domain, keywords)
            })
            .collect();

        Self { rules }
    }

    pub fn rules(&self) -> &[(Domain, Vec<String>)] {
        &self.rules
    }
}

impl Default for DomainTaxonomy {
    fn default() -> Self {
        Self::new([
            (
                Domain::Research,
                vec!["research", "laboratory", "lab", "study", "experiment", "investigation"],
            ),
            (Domain::Fellowship, vec!["fellowship", "fellow", "award", "honor"]),
            (Domain::Internship, vec!["internship", "intern", "training", "placement"]),
            (
                Domain::Scholarship,
                vec!["scholarship", "grant", "financial aid", "funding", "stipend"],
            ),
            (Domain::Conference, vec!["conference", "symposium", "workshop", "seminar"]),
            (Domain::Competition, vec!["competition", "contest", "challenge", "hackathon"]),
            (Domain::Grant, vec!["grant", "funding", "support", "award"]),
        ])
    }
}

/// Keyword-count classifier for freshly ingested opportunity text.
#[derive(Debug, Clone, Default)]
pub struct DomainClassifier {
    taxonomy: DomainTaxonomy,
}

impl DomainClassifier {
    pub fn new(taxonomy: DomainTaxonomy) -> Self {
        Self { taxonomy }
    }

    /// Each keyword contained in the text counts once for its domain; the
    /// domain with the highest count wins, `Other` when nothing matched.
    pub fn classify(&self, text: &str) -> Domain {
        let haystack = text.to_lowercase();
        let mut best = Domain::Other;
        let mut best_hits = 0usize;

        for (domain, keywords) in self.taxonomy.rules() {
            let hits = keywords
                .iter()
                .filter(|keyword| haystack.contains(keyword.as_str()))
                .count();

            // strict comparison keeps the earlier rule on ties
            if hits > best_hits {
                best = *domain;
                best_hits = hits;
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_keywords_is_other() {
        let classifier = DomainClassifier::default();
        assert_eq!(classifier.classify("Campus parking update"), Domain::Other);
        assert_eq!(classifier.classify(""), Domain::Other);
    }

    #[test]
    fn single_keyword_selects_its_domain() {
        let classifier = DomainClassifier::default();
        assert_eq!(classifier.classify("Annual HACKATHON"), Domain::Competition);
        assert_eq!(classifier.classify("Spring symposium"), Domain::Conference);
        assert_eq!(classifier.classify("Summer intern"), Domain::Internship);
    }

    #[test]
    fn highest_count_wins() {
        let classifier = DomainClassifier::default();
        let text = "Paid internship with training placement, includes a short study";
        assert_eq!(classifier.classify(text), Domain::Internship);
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let classifier = DomainClassifier::default();
        // competition: one distinct keyword; research: "research" and "lab"
        let text = "contest contest contest research lab";
        assert_eq!(classifier.classify(text), Domain::Research);
    }

    #[test]
    fn ties_go_to_the_earlier_domain() {
        let classifier = DomainClassifier::default();
        // "grant" is listed under scholarship and grant
        for _ in 0..10 {
            assert_eq!(classifier.classify("Travel grant"), Domain::Scholarship);
        }
        // "award" is listed under fellowship and grant
        assert_eq!(classifier.classify("Dean's award"), Domain::Fellowship);
    }

    #[test]
    fn substituted_taxonomy_is_used() {
        let taxonomy = DomainTaxonomy::new([
            (Domain::Grant, vec!["money"]),
            (Domain::Research, vec!["money"]),
        ]);
        let classifier = DomainClassifier::new(taxonomy);
        assert_eq!(classifier.classify("free money"), Domain::Grant);
        assert_eq!(classifier.classify("research"), Domain::Other);
    }

    #[test]
    fn other_rules_are_ignored() {
        let taxonomy = DomainTaxonomy::new([(Domain::Other, vec!["misc"])]);
        assert!(taxonomy.rules().is_empty());
    }
}
