//! Korean city names the provider doesn't understand, mapped to the English
//! names it expects.

const CITY_ALIASES: &[(&str, &str)] = &[
    ("서울", "Seoul"),
    ("부산", "Busan"),
    ("아산", "Asan"),
    ("동탄", "Dongtan"),
    ("인천", "Incheon"),
    ("대구", "Daegu"),
    ("대전", "Daejeon"),
    ("광주", "Gwangju"),
    ("울산", "Ulsan"),
    ("제주", "Jeju"),
    ("도쿄", "Tokyo"),
    ("오사카", "Osaka"),
    ("뉴욕", "New York"),
    ("런던", "London"),
    ("파리", "Paris"),
    ("베를린", "Berlin"),
    ("시드니", "Sydney"),
];

/// Map a local-language city name to its provider name.
/// Anything not in the table is returned verbatim.
pub fn resolve_alias(input: &str) -> &str {
    CITY_ALIASES
        .iter()
        .find(|(local, _)| *local == input)
        .map(|(_, english)| *english)
        .unwrap_or(input)
}

/// The full table, in display order.
pub fn aliases() -> &'static [(&'static str, &'static str)] {
    CITY_ALIASES
}
