//! Logements vacants de plus de 2 ans (millésime 2025) par région
//!
//! Particularité héritée des données sources : la table régionale est clée
//! par NOM d'affichage, alors que départements et communes le sont par code
//! INSEE. La table `REGION_CODES` fait le pont code → nom, y compris pour
//! les DOM-TOM où région et département désignent le même territoire.

use super::TerritorySource;

/// Table régionale : (nom, vacants +2 ans, population, superficie km²)
pub const REGIONS: &[(&str, TerritorySource)] = &[
    // DOM-TOM (région = département)
    ("Guadeloupe", TerritorySource { vacants: 16528, population: 384_239, superficie: 1628 }),
    ("Martinique", TerritorySource { vacants: 17634, population: 364_508, superficie: 1128 }),
    ("Guyane", TerritorySource { vacants: 7738, population: 290_691, superficie: 83_534 }),
    ("La Réunion", TerritorySource { vacants: 13171, population: 873_311, superficie: 2512 }),
    ("Mayotte", TerritorySource { vacants: 2960, population: 279_471, superficie: 374 }),
    // Régions métropolitaines
    ("Île-de-France", TerritorySource { vacants: 134_275, population: 12_278_210, superficie: 12_012 }),
    ("Centre-Val de Loire", TerritorySource { vacants: 63_032, population: 2_572_853, superficie: 39_151 }),
    ("Bourgogne-Franche-Comté", TerritorySource { vacants: 85_173, population: 2_795_301, superficie: 47_784 }),
    ("Normandie", TerritorySource { vacants: 58_877, population: 3_325_032, superficie: 29_906 }),
    ("Hauts-de-France", TerritorySource { vacants: 90_870, population: 5_965_023, superficie: 31_813 }),
    ("Grand Est", TerritorySource { vacants: 128_547, population: 5_511_747, superficie: 57_433 }),
    ("Pays de la Loire", TerritorySource { vacants: 50_182, population: 3_817_892, superficie: 32_082 }),
    ("Bretagne", TerritorySource { vacants: 64_734, population: 3_373_835, superficie: 27_208 }),
    ("Nouvelle-Aquitaine", TerritorySource { vacants: 154_424, population: 6_010_289, superficie: 84_036 }),
    ("Occitanie", TerritorySource { vacants: 154_486, population: 5_924_858, superficie: 72_724 }),
    ("Auvergne-Rhône-Alpes", TerritorySource { vacants: 183_182, population: 8_078_654, superficie: 69_711 }),
    ("Provence-Alpes-Côte d'Azur", TerritorySource { vacants: 106_843, population: 5_059_473, superficie: 31_400 }),
    ("Corse", TerritorySource { vacants: 15_814, population: 344_679, superficie: 8722 }),
];

/// Codes INSEE région → nom d'affichage (référentiel code officiel géographique)
pub const REGION_CODES: &[(&str, &str)] = &[
    ("11", "Île-de-France"),
    ("24", "Centre-Val de Loire"),
    ("27", "Bourgogne-Franche-Comté"),
    ("28", "Normandie"),
    ("32", "Hauts-de-France"),
    ("44", "Grand Est"),
    ("52", "Pays de la Loire"),
    ("53", "Bretagne"),
    ("75", "Nouvelle-Aquitaine"),
    ("76", "Occitanie"),
    ("84", "Auvergne-Rhône-Alpes"),
    ("93", "Provence-Alpes-Côte d'Azur"),
    ("94", "Corse"),
    // DOM-TOM : codes région des contours open data
    ("01", "Guadeloupe"),
    ("02", "Martinique"),
    ("03", "Guyane"),
    ("04", "La Réunion"),
    ("06", "Mayotte"),
];

/// Codes département DOM-TOM → nom de la région équivalente
pub const DOMTOM_DEPARTEMENT_CODES: &[(&str, &str)] = &[
    ("971", "Guadeloupe"),
    ("972", "Martinique"),
    ("973", "Guyane"),
    ("974", "La Réunion"),
    ("976", "Mayotte"),
];

/// Appartenance région → départements (code officiel géographique INSEE)
pub const REGION_DEPARTEMENTS: &[(&str, &[&str])] = &[
    ("Auvergne-Rhône-Alpes", &["01", "03", "07", "15", "26", "38", "42", "43", "63", "69", "73", "74"]),
    ("Bourgogne-Franche-Comté", &["21", "25", "39", "58", "70", "71", "89", "90"]),
    ("Bretagne", &["22", "29", "35", "56"]),
    ("Centre-Val de Loire", &["18", "28", "36", "37", "41", "45"]),
    ("Corse", &["2A", "2B"]),
    ("Grand Est", &["08", "10", "51", "52", "54", "55", "57", "67", "68"]),
    ("Hauts-de-France", &["02", "59", "60", "62", "80"]),
    ("Île-de-France", &["75", "77", "78", "91", "92", "93", "94", "95"]),
    ("Normandie", &["14", "27", "50", "61", "76"]),
    ("Nouvelle-Aquitaine", &["16", "17", "19", "23", "24", "33", "40", "47", "64", "79", "86", "87"]),
    ("Occitanie", &["09", "11", "12", "30", "31", "32", "34", "46", "48", "65", "66", "81", "82"]),
    ("Pays de la Loire", &["44", "49", "53", "72", "85"]),
    ("Provence-Alpes-Côte d'Azur", &["04", "05", "06", "13", "83", "84"]),
    // Départements et régions d'outre-mer
    ("Guadeloupe", &["971"]),
    ("Martinique", &["972"]),
    ("Guyane", &["973"]),
    ("La Réunion", &["974"]),
    ("Mayotte", &["976"]),
];

/// Recherche une entrée régionale par nom d'affichage
pub fn lookup(nom: &str) -> Option<&'static TerritorySource> {
    REGIONS
        .iter()
        .find(|(n, _)| *n == nom)
        .map(|(_, source)| source)
}

/// Nom de région pour un code INSEE région (ou un code département DOM-TOM)
pub fn name_for_code(code: &str) -> Option<&'static str> {
    REGION_CODES
        .iter()
        .chain(DOMTOM_DEPARTEMENT_CODES.iter())
        .find(|(c, _)| *c == code)
        .map(|(_, nom)| *nom)
}

/// Départements d'une région (par nom) ; inconnue → tranche vide
pub fn departements_of(nom: &str) -> &'static [&'static str] {
    REGION_DEPARTEMENTS
        .iter()
        .find(|(n, _)| *n == nom)
        .map(|(_, deps)| *deps)
        .unwrap_or(&[])
}

/// Région d'appartenance d'un département (mapping inverse)
pub fn region_of_departement(code: &str) -> Option<&'static str> {
    REGION_DEPARTEMENTS
        .iter()
        .find(|(_, deps)| deps.contains(&code))
        .map(|(nom, _)| *nom)
}

/// Les DOM-TOM sont à la fois région et département
pub fn is_domtom(nom: &str) -> bool {
    DOMTOM_DEPARTEMENT_CODES.iter().any(|(_, n)| *n == nom)
}
