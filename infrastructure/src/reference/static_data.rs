//! Built-in flag and roster tables.

use dais_application::ReferenceData;

/// Delegation name to ISO 3166-1 alpha-2 code.
const COUNTRY_CODES: &[(&str, &str)] = &[
    ("Algeria", "DZ"),
    ("Argentina", "AR"),
    ("Australia", "AU"),
    ("Brazil", "BR"),
    ("Canada", "CA"),
    ("Chile", "CL"),
    ("China", "CN"),
    ("Colombia", "CO"),
    ("Denmark", "DK"),
    ("Ecuador", "EC"),
    ("Egypt", "EG"),
    ("Ethiopia", "ET"),
    ("France", "FR"),
    ("Germany", "DE"),
    ("Ghana", "GH"),
    ("Greece", "GR"),
    ("Guyana", "GY"),
    ("India", "IN"),
    ("Indonesia", "ID"),
    ("Iran", "IR"),
    ("Israel", "IL"),
    ("Italy", "IT"),
    ("Japan", "JP"),
    ("Kenya", "KE"),
    ("Malta", "MT"),
    ("Mexico", "MX"),
    ("Mozambique", "MZ"),
    ("Nigeria", "NG"),
    ("Norway", "NO"),
    ("Pakistan", "PK"),
    ("Panama", "PA"),
    ("Poland", "PL"),
    ("Republic of Korea", "KR"),
    ("Russian Federation", "RU"),
    ("Saudi Arabia", "SA"),
    ("Sierra Leone", "SL"),
    ("Slovenia", "SI"),
    ("Somalia", "SO"),
    ("South Africa", "ZA"),
    ("Spain", "ES"),
    ("Sweden", "SE"),
    ("Switzerland", "CH"),
    ("Turkey", "TR"),
    ("Ukraine", "UA"),
    ("United Arab Emirates", "AE"),
    ("United Kingdom", "GB"),
    ("United States", "US"),
    ("Viet Nam", "VN"),
];

/// Delegations without a national flag.
const THEMATIC_EMOJI: &[(&str, &str)] = &[
    ("European Union", "\u{1F1EA}\u{1F1FA}"),
    ("Holy See", "\u{1F1FB}\u{1F1E6}"),
    ("State of Palestine", "\u{1F1F5}\u{1F1F8}"),
    ("African Union", "\u{1F30D}"),
    ("Red Cross", "\u{2695}\u{FE0F}"),
    ("Press", "\u{1F4F0}"),
];

const COMMITTEES: &[(&str, &[&str])] = &[
    (
        "UNSC",
        &[
            "China",
            "France",
            "Russian Federation",
            "United Kingdom",
            "United States",
            "Denmark",
            "Greece",
            "Guyana",
            "Pakistan",
            "Panama",
            "Republic of Korea",
            "Sierra Leone",
            "Slovenia",
            "Somalia",
            "Algeria",
        ],
    ),
    (
        "UNHRC",
        &[
            "Argentina",
            "Brazil",
            "Chile",
            "China",
            "France",
            "Germany",
            "Ghana",
            "India",
            "Indonesia",
            "Japan",
            "Kenya",
            "Mexico",
            "Nigeria",
            "South Africa",
            "United Arab Emirates",
            "United Kingdom",
        ],
    ),
    (
        "DISEC",
        &[
            "Australia",
            "Canada",
            "China",
            "Egypt",
            "France",
            "India",
            "Iran",
            "Israel",
            "Japan",
            "Norway",
            "Pakistan",
            "Russian Federation",
            "Saudi Arabia",
            "Sweden",
            "Ukraine",
            "United Kingdom",
            "United States",
        ],
    ),
];

/// Flag table and preset rosters compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticReferenceData;

impl StaticReferenceData {
    pub fn new() -> Self {
        Self
    }
}

/// Regional-indicator pair for a two-letter code.
fn flag_from_code(code: &str) -> Option<String> {
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    code.bytes()
        .map(|b| char::from_u32(0x1F1E6 + u32::from(b - b'A')))
        .collect()
}

fn lookup<'a, V: Copy>(table: &'a [(&'a str, V)], name: &str) -> Option<V> {
    let name = name.trim();
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| *value)
}

impl ReferenceData for StaticReferenceData {
    fn flag_for(&self, delegation: &str) -> Option<String> {
        if let Some(code) = lookup(COUNTRY_CODES, delegation) {
            return flag_from_code(code);
        }
        lookup(THEMATIC_EMOJI, delegation).map(str::to_string)
    }

    fn roster_for(&self, committee: &str) -> Option<Vec<String>> {
        lookup(COMMITTEES, committee)
            .map(|members| members.iter().map(|m| m.to_string()).collect())
    }

    fn committees(&self) -> Vec<String> {
        COMMITTEES.iter().map(|(name, _)| name.to_string()).collect()
    }
}
