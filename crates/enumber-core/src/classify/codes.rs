//! Fixed code sets used by the first three risk rules.
//!
//! All entries are bare canonical codes (see `AdditiveCode`). A code that
//! appears in more than one set is decided by rule order: high before
//! moderate before safe.

use std::collections::HashSet;
use std::sync::LazyLock;

pub static HIGH_RISK: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from_iter([
        // Artificial colours linked to hyperactivity
        "102", "104", "110", "122", "124", "129", "131", "132", "133", "127", "154", "180",
        // Aspartame, saccharin, sucralose, neotame
        "951", "954", "955", "961",
        // Sulfites
        "220", "221", "222", "223", "224", "225", "226", "227", "228",
        // Nitrites and nitrates
        "249", "250", "251", "252",
        // Glutamate family
        "621", "622", "623", "624", "625",
        // Benzoates and hydroxybenzoates
        "210", "211", "212", "213", "214", "215", "216", "217", "218", "219",
        // Trans-fat related
        "441", "442",
        // Aluminium compounds
        "173", "541", "554", "555", "556", "559",
        // Emulsifiers under review
        "407a", "425", "466",
    ])
});

pub static MODERATE_RISK: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from_iter([
        // Phosphates
        "338", "339", "340", "341", "343", "450", "451", "452",
        // Carrageenan
        "407",
        // Antioxidants with usage caps
        "320", "321", "310", "311", "312", "319", "324",
        // Synthetic colours
        "123", "155", "160b", "161g", "163",
        // Cellulose derivatives and gums
        "414", "415", "418", "460", "461", "462", "463", "464", "465", "466", "468", "469",
        // Flour treatment agents
        "924", "925", "926", "927", "928",
        // Ammonia caramels
        "150c", "150d",
    ])
});

pub static SAFE: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from_iter([
        // Riboflavin
        "101", "101i", "101ii",
        // Vitamin C compounds
        "300", "301", "302", "303", "304", "304i", "304ii",
        // Tocopherols
        "306", "307", "307a", "307b", "307c", "308", "309",
        // Natural colours
        "100", "140", "140i", "140ii", "160a", "160ai", "160aii", "160c", "160d", "160e",
        "160f", "161a", "161b", "161c", "161d", "161e", "161f", "161h", "161i", "161j",
        "162", "163a", "163b", "163c", "163d", "163e", "163f",
        // Citrates and tartrates
        "330", "331", "331i", "331ii", "331iii", "332", "332i", "332ii", "333", "333i",
        "333ii", "333iii", "334", "335", "335i", "335ii", "336", "336i", "336ii", "337",
        // Plain caramel, sorbates, lactic acid, carbon dioxide
        "150a", "200", "202", "203", "270", "290",
        // Lecithins
        "322", "322i", "322ii",
        // Alginates, agar and plant gums
        "401", "402", "403", "404", "405", "406", "407", "410", "412", "413", "415", "416",
        "417",
        // Pectins
        "440", "440i", "440ii",
        // Mono- and diglycerides
        "471",
        // Carbonates, chlorides and sulfates
        "500", "500i", "500ii", "500iii", "501", "501i", "501ii", "503", "503i", "503ii",
        "504", "504i", "504ii", "507", "508", "509", "511", "513", "514", "514i", "514ii",
        "515", "515i", "515ii", "516", "517", "518",
        // Polyols and stevia
        "420", "420i", "420ii", "965", "965i", "965ii", "967", "968", "960",
        // Packaging gases
        "938", "939", "941", "942", "948", "949",
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sets_use_bare_codes() {
        for code in HIGH_RISK.iter().chain(MODERATE_RISK.iter()).chain(SAFE.iter()) {
            assert!(!code.starts_with('e') && !code.starts_with('E'), "{code}");
            assert_eq!(*code, code.to_lowercase());
        }
    }

    #[test]
    fn test_known_overlaps() {
        // Resolved by rule order, not by set membership.
        assert!(HIGH_RISK.contains("466") && MODERATE_RISK.contains("466"));
        assert!(MODERATE_RISK.contains("407") && SAFE.contains("407"));
        assert!(MODERATE_RISK.contains("415") && SAFE.contains("415"));
    }
}
