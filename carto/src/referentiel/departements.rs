//! Logements vacants de plus de 2 ans (millésime 2025) par département
//!
//! Source : fichiers LOVAC / data.gouv.fr, clé = code INSEE du département.

use super::TerritorySource;

/// Table départementale : (code, vacants +2 ans, population, superficie km²)
pub const DEPARTEMENTS: &[(&str, TerritorySource)] = &[
    // Ain
    ("01", TerritorySource { vacants: 12070, population: 652_432, superficie: 5762 }),
    // Aisne
    ("02", TerritorySource { vacants: 12136, population: 531_345, superficie: 7369 }),
    // Allier
    ("03", TerritorySource { vacants: 16808, population: 337_988, superficie: 7340 }),
    // Alpes-de-Haute-Provence
    ("04", TerritorySource { vacants: 7572, population: 164_308, superficie: 6925 }),
    // Hautes-Alpes
    ("05", TerritorySource { vacants: 5275, population: 141_284, superficie: 5549 }),
    // Alpes-Maritimes
    ("06", TerritorySource { vacants: 24110, population: 1_083_310, superficie: 4299 }),
    // Ardèche
    ("07", TerritorySource { vacants: 13438, population: 328_278, superficie: 5529 }),
    // Ardennes
    ("08", TerritorySource { vacants: 8766, population: 270_582, superficie: 5229 }),
    // Ariège
    ("09", TerritorySource { vacants: 6116, population: 153_287, superficie: 4890 }),
    // Aube
    ("10", TerritorySource { vacants: 9726, population: 310_020, superficie: 6004 }),
    // Aude
    ("11", TerritorySource { vacants: 13882, population: 374_070, superficie: 6139 }),
    // Aveyron
    ("12", TerritorySource { vacants: 14916, population: 279_206, superficie: 8735 }),
    // Bouches-du-Rhône
    ("13", TerritorySource { vacants: 34346, population: 2_043_110, superficie: 5087 }),
    // Calvados
    ("14", TerritorySource { vacants: 11130, population: 694_002, superficie: 5548 }),
    // Cantal
    ("15", TerritorySource { vacants: 7582, population: 144_692, superficie: 5726 }),
    // Charente
    ("16", TerritorySource { vacants: 10944, population: 352_705, superficie: 5956 }),
    // Charente-Maritime
    ("17", TerritorySource { vacants: 14498, population: 651_358, superficie: 6864 }),
    // Cher
    ("18", TerritorySource { vacants: 12624, population: 302_306, superficie: 7235 }),
    // Corrèze
    ("19", TerritorySource { vacants: 11387, population: 241_464, superficie: 5857 }),
    // Côte-d'Or
    ("21", TerritorySource { vacants: 12688, population: 534_124, superficie: 8763 }),
    // Côtes-d'Armor
    ("22", TerritorySource { vacants: 14888, population: 598_814, superficie: 6878 }),
    // Creuse
    ("23", TerritorySource { vacants: 9319, population: 116_617, superficie: 5565 }),
    // Dordogne
    ("24", TerritorySource { vacants: 15686, population: 413_606, superficie: 9060 }),
    // Doubs
    ("25", TerritorySource { vacants: 11219, population: 543_974, superficie: 5234 }),
    // Drôme
    ("26", TerritorySource { vacants: 11000, population: 516_762, superficie: 6530 }),
    // Eure
    ("27", TerritorySource { vacants: 9766, population: 601_843, superficie: 6040 }),
    // Eure-et-Loir
    ("28", TerritorySource { vacants: 8384, population: 431_575, superficie: 5880 }),
    // Finistère
    ("29", TerritorySource { vacants: 19885, population: 915_090, superficie: 6733 }),
    // Corse-du-Sud
    ("2A", TerritorySource { vacants: 7168, population: 158_507, superficie: 4014 }),
    // Haute-Corse
    ("2B", TerritorySource { vacants: 8646, population: 181_933, superficie: 4666 }),
    // Gard
    ("30", TerritorySource { vacants: 17998, population: 748_437, superficie: 5853 }),
    // Haute-Garonne
    ("31", TerritorySource { vacants: 18682, population: 1_400_039, superficie: 6309 }),
    // Gers
    ("32", TerritorySource { vacants: 6889, population: 191_377, superficie: 6257 }),
    // Gironde
    ("33", TerritorySource { vacants: 24285, population: 1_601_845, superficie: 9976 }),
    // Hérault
    ("34", TerritorySource { vacants: 23696, population: 1_175_623, superficie: 6101 }),
    // Ille-et-Vilaine
    ("35", TerritorySource { vacants: 14472, population: 1_079_498, superficie: 6775 }),
    // Indre
    ("36", TerritorySource { vacants: 9927, population: 219_316, superficie: 6791 }),
    // Indre-et-Loire
    ("37", TerritorySource { vacants: 10793, population: 610_079, superficie: 6127 }),
    // Isère
    ("38", TerritorySource { vacants: 19424, population: 1_271_166, superficie: 7431 }),
    // Jura
    ("39", TerritorySource { vacants: 9232, population: 259_199, superficie: 4999 }),
    // Landes
    ("40", TerritorySource { vacants: 9580, population: 413_690, superficie: 9243 }),
    // Loir-et-Cher
    ("41", TerritorySource { vacants: 8903, population: 331_280, superficie: 6343 }),
    // Loire
    ("42", TerritorySource { vacants: 19580, population: 765_634, superficie: 4781 }),
    // Haute-Loire
    ("43", TerritorySource { vacants: 11085, population: 227_339, superficie: 4977 }),
    // Loire-Atlantique
    ("44", TerritorySource { vacants: 14255, population: 1_429_272, superficie: 6815 }),
    // Loiret
    ("45", TerritorySource { vacants: 12401, population: 687_717, superficie: 6775 }),
    // Lot
    ("46", TerritorySource { vacants: 7541, population: 174_754, superficie: 5217 }),
    // Lot-et-Garonne
    ("47", TerritorySource { vacants: 12563, population: 332_833, superficie: 5361 }),
    // Lozère
    ("48", TerritorySource { vacants: 4431, population: 76_601, superficie: 5167 }),
    // Maine-et-Loire
    ("49", TerritorySource { vacants: 9676, population: 818_273, superficie: 7166 }),
    // Manche
    ("50", TerritorySource { vacants: 11009, population: 495_045, superficie: 5938 }),
    // Marne
    ("51", TerritorySource { vacants: 12181, population: 566_855, superficie: 8162 }),
    // Haute-Marne
    ("52", TerritorySource { vacants: 7296, population: 172_512, superficie: 6211 }),
    // Mayenne
    ("53", TerritorySource { vacants: 7072, population: 307_445, superficie: 5175 }),
    // Meurthe-et-Moselle
    ("54", TerritorySource { vacants: 14795, population: 733_481, superficie: 5246 }),
    // Meuse
    ("55", TerritorySource { vacants: 7380, population: 184_083, superficie: 6211 }),
    // Morbihan
    ("56", TerritorySource { vacants: 15489, population: 750_863, superficie: 6823 }),
    // Moselle
    ("57", TerritorySource { vacants: 21140, population: 1_043_522, superficie: 6216 }),
    // Nièvre
    ("58", TerritorySource { vacants: 12024, population: 204_452, superficie: 6817 }),
    // Nord
    ("59", TerritorySource { vacants: 35956, population: 2_604_361, superficie: 5743 }),
    // Oise
    ("60", TerritorySource { vacants: 11120, population: 829_419, superficie: 5860 }),
    // Orne
    ("61", TerritorySource { vacants: 9422, population: 279_942, superficie: 6103 }),
    // Pas-de-Calais
    ("62", TerritorySource { vacants: 20205, population: 1_465_278, superficie: 6671 }),
    // Puy-de-Dôme
    ("63", TerritorySource { vacants: 23051, population: 658_275, superficie: 7970 }),
    // Pyrénées-Atlantiques
    ("64", TerritorySource { vacants: 13725, population: 682_621, superficie: 7645 }),
    // Hautes-Pyrénées
    ("65", TerritorySource { vacants: 9695, population: 229_567, superficie: 4464 }),
    // Pyrénées-Orientales
    ("66", TerritorySource { vacants: 13842, population: 479_979, superficie: 4116 }),
    // Bas-Rhin
    ("67", TerritorySource { vacants: 17975, population: 1_125_559, superficie: 4755 }),
    // Haut-Rhin
    ("68", TerritorySource { vacants: 16283, population: 764_030, superficie: 3525 }),
    // Rhône
    ("69", TerritorySource { vacants: 21048, population: 1_876_595, superficie: 2715 }),
    // Haute-Saône
    ("70", TerritorySource { vacants: 8433, population: 235_313, superficie: 5360 }),
    // Saône-et-Loire
    ("71", TerritorySource { vacants: 16559, population: 551_493, superficie: 8575 }),
    // Sarthe
    ("72", TerritorySource { vacants: 10554, population: 566_506, superficie: 6206 }),
    // Savoie
    ("73", TerritorySource { vacants: 12144, population: 433_837, superficie: 6028 }),
    // Haute-Savoie
    ("74", TerritorySource { vacants: 15952, population: 825_987, superficie: 4388 }),
    // Paris
    ("75", TerritorySource { vacants: 36205, population: 2_161_063, superficie: 105 }),
    // Seine-Maritime
    ("76", TerritorySource { vacants: 17550, population: 1_254_378, superficie: 6278 }),
    // Seine-et-Marne
    ("77", TerritorySource { vacants: 16925, population: 1_403_997, superficie: 5915 }),
    // Yvelines
    ("78", TerritorySource { vacants: 11571, population: 1_448_729, superficie: 2284 }),
    // Deux-Sèvres
    ("79", TerritorySource { vacants: 7876, population: 374_351, superficie: 5999 }),
    // Somme
    ("80", TerritorySource { vacants: 11453, population: 570_559, superficie: 6170 }),
    // Tarn
    ("81", TerritorySource { vacants: 10608, population: 387_890, superficie: 5758 }),
    // Tarn-et-Garonne
    ("82", TerritorySource { vacants: 6190, population: 260_400, superficie: 3718 }),
    // Var
    ("83", TerritorySource { vacants: 21237, population: 1_076_711, superficie: 5973 }),
    // Vaucluse
    ("84", TerritorySource { vacants: 14303, population: 559_479, superficie: 3567 }),
    // Vendée
    ("85", TerritorySource { vacants: 8625, population: 685_442, superficie: 6720 }),
    // Vienne
    ("86", TerritorySource { vacants: 11493, population: 438_435, superficie: 6990 }),
    // Haute-Vienne
    ("87", TerritorySource { vacants: 13068, population: 374_426, superficie: 5520 }),
    // Vosges
    ("88", TerritorySource { vacants: 13005, population: 364_499, superficie: 5874 }),
    // Yonne
    ("89", TerritorySource { vacants: 12111, population: 338_291, superficie: 7427 }),
    // Territoire de Belfort
    ("90", TerritorySource { vacants: 2907, population: 142_622, superficie: 609 }),
    // Essonne
    ("91", TerritorySource { vacants: 10808, population: 1_296_641, superficie: 1804 }),
    // Hauts-de-Seine
    ("92", TerritorySource { vacants: 14656, population: 1_609_306, superficie: 176 }),
    // Seine-Saint-Denis
    ("93", TerritorySource { vacants: 19849, population: 1_644_518, superficie: 236 }),
    // Val-de-Marne
    ("94", TerritorySource { vacants: 13711, population: 1_387_926, superficie: 245 }),
    // Val-d'Oise
    ("95", TerritorySource { vacants: 10550, population: 1_249_755, superficie: 1246 }),
    // Guadeloupe
    ("971", TerritorySource { vacants: 16528, population: 384_239, superficie: 1628 }),
    // Martinique
    ("972", TerritorySource { vacants: 17634, population: 364_508, superficie: 1128 }),
    // Guyane
    ("973", TerritorySource { vacants: 7738, population: 290_691, superficie: 83_534 }),
    // La Réunion
    ("974", TerritorySource { vacants: 13171, population: 873_311, superficie: 2512 }),
    // Mayotte
    ("976", TerritorySource { vacants: 2960, population: 279_471, superficie: 374 }),
];

/// Recherche une entrée départementale par code INSEE
pub fn lookup(code: &str) -> Option<&'static TerritorySource> {
    DEPARTEMENTS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, source)| source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_101_departements() {
        assert_eq!(DEPARTEMENTS.len(), 101);
    }

    #[test]
    fn test_lookup_paris() {
        let paris = lookup("75").unwrap();
        assert_eq!(paris.vacants, 36205);
        assert_eq!(paris.superficie, 105);
    }

    #[test]
    fn test_lookup_corse() {
        assert!(lookup("2A").is_some());
        assert!(lookup("2B").is_some());
        // Pas de département 20
        assert!(lookup("20").is_none());
    }

    #[test]
    fn test_lookup_outre_mer() {
        assert_eq!(lookup("971").unwrap().vacants, 16528);
        assert!(lookup("975").is_none());
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<&str> = DEPARTEMENTS.iter().map(|(c, _)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), DEPARTEMENTS.len());
    }
}
