use std::collections::HashMap;
use std::sync::LazyLock;

/// Consumer-facing facts for well-known additives, keyed by bare code.
static USAGE_BY_CODE: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Colours
    m.insert("100", "Extracted from turmeric root and used in curries, mustard and dairy desserts");
    m.insert("101", "Also known as vitamin B2 and used to give cereals and sauces a yellow tint");
    m.insert("102", "Products containing it in the EU must warn that it may affect activity and attention in children");
    m.insert("104", "Products containing it in the EU must warn that it may affect activity and attention in children");
    m.insert("110", "Common in orange drinks and snacks; EU labels must warn about effects on activity and attention in children");
    m.insert("120", "Made from cochineal insects, so it is not suitable for vegetarians");
    m.insert("122", "Products containing it in the EU must warn that it may affect activity and attention in children");
    m.insert("124", "Products containing it in the EU must warn that it may affect activity and attention in children");
    m.insert("129", "Widely used in sweets and soft drinks; EU labels must warn about effects on activity and attention in children");
    m.insert("133", "A synthetic blue dye found in confectionery, ice cream and drinks");
    m.insert("150a", "Made by heating sugars and used in colas, sauces and baked goods");
    m.insert("150d", "Gives colas their brown colour; produced with sulfite and ammonia compounds");
    m.insert("160a", "Provitamin A pigments found naturally in carrots and other vegetables");
    m.insert("160b", "Obtained from the seeds of the achiote tree and common in cheese and snacks");
    m.insert("162", "Extracted from beetroot and used in yoghurts and ice cream");
    m.insert("171", "No longer authorised as a food additive in the EU since 2022 due to genotoxicity concerns");

    // Preservatives
    m.insert("200", "Occurs naturally in rowan berries and is used in cheese, wine and baked goods");
    m.insert("202", "The potassium salt of sorbic acid, widely used against moulds and yeasts");
    m.insert("210", "Occurs naturally in some berries and is used in acidic foods and drinks");
    m.insert("211", "Can form small amounts of benzene in drinks that also contain vitamin C");
    m.insert("220", "Used in wine and dried fruit and can trigger asthma in sensitive people");
    m.insert("250", "Used to cure meats; can form nitrosamines when cooked at high temperatures");
    m.insert("251", "Used in cured meats and some cheeses; converts to nitrite during curing");
    m.insert("252", "Also called saltpetre and traditionally used to cure ham and bacon");

    // Acids and antioxidants
    m.insert("270", "Produced by fermentation and found naturally in yoghurt and sourdough");
    m.insert("290", "Provides the fizz in carbonated drinks");
    m.insert("300", "Vitamin C, naturally present in citrus fruits; prevents browning in cut fruit and cured meats");
    m.insert("306", "Vitamin E extracted from vegetable oils");
    m.insert("320", "A synthetic antioxidant used in fats and chewing gum, subject to strict usage limits");
    m.insert("322", "Usually extracted from soy or sunflower and keeps chocolate and spreads smooth");
    m.insert("330", "Naturally present in citrus fruits and commercially produced by fermentation");
    m.insert("338", "Gives cola drinks their tang; high phosphate intake is linked to lower bone density");

    // Gums and texturisers
    m.insert("407", "Extracted from red seaweed and used in dairy desserts and plant-based milks");
    m.insert("410", "Obtained from carob seeds and used in ice cream and sauces");
    m.insert("412", "Ground from guar beans; a little thickens large amounts of liquid");
    m.insert("414", "Also called gum arabic and harvested from the sap of acacia trees");
    m.insert("415", "Produced by bacterial fermentation of sugars and common in gluten-free baking");
    m.insert("418", "Produced by bacterial fermentation and forms clear, firm gels");
    m.insert("440", "Found in the cell walls of fruit and used to set jams and jellies");
    m.insert("450", "Used as a raising agent in baked goods and to retain moisture in processed meat");
    m.insert("471", "Made from vegetable or animal fats, so not always suitable for vegans");

    // Flavour enhancers and sweeteners
    m.insert("621", "The sodium salt of glutamic acid, which occurs naturally in tomatoes and cheese");
    m.insert("950", "About 200 times sweeter than sugar and often blended with other sweeteners");
    m.insert("951", "Contains a source of phenylalanine and must be avoided by people with phenylketonuria");
    m.insert("954", "The oldest artificial sweetener, about 300 times sweeter than sugar");
    m.insert("955", "About 600 times sweeter than sugar and stable when heated");
    m.insert("960", "Extracted from the leaves of the stevia plant");
    m.insert("967", "A sugar alcohol that can have a laxative effect in large amounts");

    m
});

/// Name fragments checked in order when the code has no entry.
static USAGE_BY_NAME: &[(&str, &str)] = &[
    ("curcumin", "Extracted from turmeric root and used in curries, mustard and dairy desserts"),
    ("riboflavin", "Also known as vitamin B2 and used to give cereals and sauces a yellow tint"),
    ("ascorbic", "A form of vitamin C, naturally present in citrus fruits"),
    ("citric", "Naturally present in citrus fruits and commercially produced by fermentation"),
    ("lecithin", "Usually extracted from soy or sunflower and keeps chocolate and spreads smooth"),
    ("pectin", "Found in the cell walls of fruit and used to set jams and jellies"),
    ("gellan", "Produced by bacterial fermentation and forms clear, firm gels"),
];

/// Specific usage sentence: exact code first, then name fragment.
pub fn usage_note(bare_code: &str, display_name: &str) -> Option<&'static str> {
    if let Some(note) = USAGE_BY_CODE.get(bare_code).copied() {
        return Some(note);
    }
    let name = display_name.to_lowercase();
    USAGE_BY_NAME
        .iter()
        .find(|(fragment, _)| name.contains(fragment))
        .map(|(_, note)| *note)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_lookup() {
        assert!(usage_note("951", "").unwrap().contains("phenylketonuria"));
    }

    #[test]
    fn test_code_wins_over_name() {
        assert!(usage_note("120", "Curcumin").unwrap().contains("cochineal"));
    }

    #[test]
    fn test_name_fallback() {
        assert!(usage_note("9999", "L-Ascorbic acid").unwrap().contains("citrus"));
        assert!(usage_note("9999", "Gellan gum").unwrap().contains("gels"));
    }

    #[test]
    fn test_none_when_unknown() {
        assert_eq!(usage_note("9999", "Mystery additive"), None);
    }

    #[test]
    fn test_table_covers_well_known_additives() {
        assert!(USAGE_BY_CODE.len() >= 40);
        assert!(USAGE_BY_CODE.keys().all(|k| k.chars().next().unwrap().is_ascii_digit()));
    }
}
