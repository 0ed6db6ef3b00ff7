use serde::Deserialize;

/// Sexual-misconduct synonyms that only the extended vocabulary carries.
const MISCONDUCT_SYNONYMS: &[&str] = &[
    "sexually harrasing",
    "sexually harassed",
    "sexually assaulting",
    "sexually assaulted",
    "sexually abusing",
    "sexually abused",
];

pub const EXTENDED_KEYWORDS: &[&str] = &[
    "gender inequality",
    "gender issue",
    "gender justice",
    "gender pay gap",
    "gender proud",
    "gender gap",
    "gendered violence",
    "sexual harassment",
    "sexism",
    "sexual assault",
    "sexual crime",
    "sexual harassment",
    "sexual misconduct",
    "sexual violence",
    "sexual abuse",
    "sexual accusation",
    "sexually harrasing",
    "sexually harassed",
    "sexually assaulting",
    "sexually assaulted",
    "sexually abusing",
    "sexually abused",
    "domestic violence",
    "intimate partner violence",
    "misogyny",
    "hashtag activism",
    "feminism",
    "feminist",
    "misogyny",
    "gender equality",
    "Chief Diversity Officer",
    "Diversity and Inclusion",
    "Diversity & Inclusion",
    "D&I",
    "diversity delegate",
    "sexism awareness",
    "code of conduct on sexual harassment",
    "anti-harassment policy and complaint",
    "anti-discrimination and harassment policy",
    "Sexual Harassment Prevention Training",
    "bystander intervention",
    "Equal Employment Opportunity",
    "whistleblower complaint",
    "zero-tolerance diversity policy",
    "parental leave",
    "freedom from discrimination",
    "freedom from harassment",
    "freedom from violence",
    "reporting workplace harassment",
    "Commitment to women empowerment",
    "gender-sensitive language",
    "diversity",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vocabulary {
    #[default]
    Extended,
    Basic,
}

impl Vocabulary {
    pub fn keywords(&self) -> Vec<&'static str> {
        match self {
            Vocabulary::Extended => EXTENDED_KEYWORDS.to_vec(),
            Vocabulary::Basic => EXTENDED_KEYWORDS
                .iter()
                .copied()
                .filter(|k| !MISCONDUCT_SYNONYMS.contains(k))
                .collect(),
        }
    }
}

/// The matching vocabulary for a run. Read-only once built.
///
/// Order matters: the matcher walks keywords in this order, and that order
/// decides which paragraph is reported first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Builds a set from configured keywords. Blank entries and repeats are
    /// dropped, first occurrence wins. Every keyword containing a space gets
    /// a hyphenated twin appended after the configured list.
    pub fn new<I, S>(configured: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords: Vec<String> = Vec::new();
        for keyword in configured {
            let keyword = keyword.as_ref().trim();
            if !keyword.is_empty() && !keywords.iter().any(|k| k == keyword) {
                keywords.push(keyword.to_string());
            }
        }

        let variants: Vec<String> = keywords
            .iter()
            .filter(|k| k.contains(' '))
            .map(|k| k.replace(' ', "-"))
            .collect();
        for variant in variants {
            if !keywords.contains(&variant) {
                keywords.push(variant);
            }
        }

        Self { keywords }
    }

    pub fn from_vocabulary(vocabulary: Vocabulary) -> Self {
        Self::new(vocabulary.keywords())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::from_vocabulary(Vocabulary::default())
    }
}
