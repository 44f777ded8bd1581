//! Builtin reference catalog loaded by `opkb seed`.

use crate::entities::characters::{CharacterStatus, Role};
use crate::entities::devil_fruits::FruitType;

use CharacterStatus::{Alive, Dead};
use FruitType::{Logia, Paramecia, Zoan};
use Role::{Marine, Pirate, Revolutionary};

pub struct ArcSeed {
    pub name: &'static str,
    pub saga: &'static str,
    pub start: i32,
    pub end: i32,
}

pub struct FruitSeed {
    pub name: &'static str,
    pub romanji: &'static str,
    pub fruit_type: FruitType,
    pub ability: &'static str,
    pub rarity: i32,
}

pub struct CrewSeed {
    pub name: &'static str,
    pub ship_name: &'static str,
    pub base_location: &'static str,
}

pub struct CharacterSeed {
    pub name: &'static str,
    pub epithet: &'static str,
    pub role: Role,
    pub bounty: i64,
    pub origin: &'static str,
    pub status: CharacterStatus,
}

const fn arc(name: &'static str, saga: &'static str, start: i32, end: i32) -> ArcSeed {
    ArcSeed {
        name,
        saga,
        start,
        end,
    }
}

const fn fruit(
    name: &'static str,
    romanji: &'static str,
    fruit_type: FruitType,
    ability: &'static str,
    rarity: i32,
) -> FruitSeed {
    FruitSeed {
        name,
        romanji,
        fruit_type,
        ability,
        rarity,
    }
}

const fn crew(name: &'static str, ship_name: &'static str, base_location: &'static str) -> CrewSeed {
    CrewSeed {
        name,
        ship_name,
        base_location,
    }
}

const fn character(
    name: &'static str,
    epithet: &'static str,
    role: Role,
    bounty: i64,
    origin: &'static str,
    status: CharacterStatus,
) -> CharacterSeed {
    CharacterSeed {
        name,
        epithet,
        role,
        bounty,
        origin,
        status,
    }
}

pub const ARCS: &[ArcSeed] = &[
    arc("Romance Dawn", "East Blue", 1, 3),
    arc("Orange Town", "East Blue", 4, 8),
    arc("Village de Sirop", "East Blue", 9, 18),
    arc("Baratie", "East Blue", 19, 30),
    arc("Arlong Park", "East Blue", 31, 44),
    arc("Loguetown", "East Blue", 45, 53),
    arc("Rêve de Barbe Blanche", "East Blue", 54, 61),
    arc("Alabasta", "Alabasta", 62, 130),
    arc("Jaya", "Sky Island", 144, 152),
    arc("Skypiea", "Sky Island", 153, 195),
    arc("Long Ring Long Land", "Water 7", 207, 219),
    arc("Water 7", "Water 7", 229, 263),
    arc("Enies Lobby", "Water 7", 264, 312),
    arc("Post-Enies Lobby", "Water 7", 313, 325),
    arc("Thriller Bark", "Thriller Bark", 337, 381),
    arc("Archipel Sabaody", "Summit War", 385, 405),
    arc("Amazon Lily", "Summit War", 408, 417),
    arc("Impel Down", "Summit War", 422, 452),
    arc("Marineford", "Summit War", 457, 489),
    arc("Post-Guerre", "Summit War", 490, 516),
    arc("Île des Hommes-Poissons", "New World", 523, 574),
    arc("Punk Hazard", "New World", 579, 628),
    arc("Dressrosa", "New World", 629, 746),
    arc("Zou", "New World", 751, 802),
    arc("Whole Cake Island", "New World", 825, 902),
    arc("Reverie", "New World", 903, 908),
    arc("Pays de Wano", "Wano", 909, 1057),
];

pub const FRUITS: &[FruitSeed] = &[
    fruit("Gomu Gomu no Mi", "Gomu Gomu no Mi", Paramecia, "Permet au corps de s'étirer comme du caoutchouc", 3),
    fruit("Mera Mera no Mi", "Mera Mera no Mi", Logia, "Permet de créer et contrôler le feu", 5),
    fruit("Magu Magu no Mi", "Magu Magu no Mi", Logia, "Permet de créer et contrôler le magma", 5),
    fruit("Pika Pika no Mi", "Pika Pika no Mi", Logia, "Permet de créer et contrôler la lumière", 5),
    fruit("Hana Hana no Mi", "Hana Hana no Mi", Paramecia, "Permet de faire pousser des parties du corps n'importe où", 4),
    fruit("Yami Yami no Mi", "Yami Yami no Mi", Logia, "Permet de créer et contrôler les ténèbres", 5),
    fruit("Gura Gura no Mi", "Gura Gura no Mi", Paramecia, "Permet de créer des tremblements de terre", 5),
    fruit("Ope Ope no Mi", "Ope Ope no Mi", Paramecia, "Permet de créer une zone où on peut tout manipuler", 5),
    fruit("Mero Mero no Mi", "Mero Mero no Mi", Paramecia, "Permet de transformer les gens en pierre", 4),
    fruit("Suna Suna no Mi", "Suna Suna no Mi", Logia, "Permet de créer et contrôler le sable", 4),
    fruit("Ito Ito no Mi", "Ito Ito no Mi", Paramecia, "Permet de créer et manipuler des fils", 4),
    fruit("Hito Hito no Mi", "Hito Hito no Mi", Zoan, "Permet de se transformer en humain", 3),
    fruit("Hito Hito no Mi, Modèle: Bouddha", "Hito Hito no Mi, Modèle: Daibutsu", Zoan, "Permet de se transformer en Bouddha géant", 5),
    fruit("Uo Uo no Mi, Modèle: Seiryu", "Uo Uo no Mi, Modèle: Seiryu", Zoan, "Permet de se transformer en dragon azur", 5),
    fruit("Soru Soru no Mi", "Soru Soru no Mi", Paramecia, "Permet de manipuler les âmes", 5),
    fruit("Yomi Yomi no Mi", "Yomi Yomi no Mi", Paramecia, "Permet de revenir à la vie après la mort", 5),
    fruit("Suke Suke no Mi", "Suke Suke no Mi", Paramecia, "Permet de devenir invisible", 3),
    fruit("Bara Bara no Mi", "Bara Bara no Mi", Paramecia, "Permet de séparer son corps en morceaux", 2),
    fruit("Supa Supa no Mi", "Supa Supa no Mi", Paramecia, "Permet de transformer ses membres en lames", 3),
    fruit("Kilo Kilo no Mi", "Kilo Kilo no Mi", Paramecia, "Permet de changer son poids", 2),
];

pub const CREWS: &[CrewSeed] = &[
    crew("Équipage du Chapeau de Paille", "Thousand Sunny", "Grand Line"),
    crew("Équipage de Barbe Rouge", "Moby Dick", "New World"),
    crew("Équipage de Barbe Noire", "Sabre de Xebec", "New World"),
    crew("Équipage du Chapeau de Paille (Heart)", "Polar Tang", "New World"),
    crew("Équipage de Kid", "Victoria Punk", "New World"),
    crew("Équipage de Big Mom", "Queen Mama Chanter", "New World"),
    crew("Équipage de Kaido", "Mammoth", "New World"),
    crew("Équipage de Buggy", "Big Top", "Grand Line"),
    crew("Équipage de Crocodile", "Banana Gator", "Grand Line"),
    crew("Équipage de Donquixote", "Numancia Flamingo", "New World"),
    crew("Équipage de Shanks", "Red Force", "New World"),
    crew("Équipage de Kuja", "Perfume Yuda", "Grand Line"),
    crew("Équipage de Jinbe", "Shark Superb", "Grand Line"),
];

pub const CHARACTERS: &[CharacterSeed] = &[
    character("Monkey D. Luffy", "Chapeau de Paille", Pirate, 3_000_000_000, "East Blue", Alive),
    character("Roronoa Zoro", "Chasseur de Pirates", Pirate, 1_111_000_000, "East Blue", Alive),
    character("Nami", "La Chatte Voleuse", Pirate, 366_000_000, "East Blue", Alive),
    character("Usopp", "Dieu", Pirate, 500_000_000, "East Blue", Alive),
    character("Sanji", "Pied Noir", Pirate, 1_032_000_000, "North Blue", Alive),
    character("Tony Tony Chopper", "Amant du Coton", Pirate, 1_000, "Grand Line", Alive),
    character("Nico Robin", "Enfant Démoniaque", Pirate, 930_000_000, "West Blue", Alive),
    character("Franky", "Cyborg", Pirate, 394_000_000, "South Blue", Alive),
    character("Brook", "Chanteur", Pirate, 383_000_000, "West Blue", Alive),
    character("Jinbe", "Chevalier des Mers", Pirate, 1_100_000_000, "Grand Line", Alive),
    character("Shanks", "Le Roux", Pirate, 4_048_900_000, "West Blue", Alive),
    character("Marshall D. Teach", "Barbe Noire", Pirate, 3_996_000_000, "Grand Line", Alive),
    character("Boa Hancock", "Impératrice Serpent", Pirate, 1_659_000_000, "Grand Line", Alive),
    character("Buggy", "Le Clown", Pirate, 3_189_000_000, "East Blue", Alive),
    character("Trafalgar D. Water Law", "Le Chirurgien de la Mort", Pirate, 3_000_000_000, "North Blue", Alive),
    character("Eustass Kid", "Le Capitaine", Pirate, 3_000_000_000, "South Blue", Alive),
    character("Monkey D. Garp", "Le Poing", Marine, 0, "East Blue", Alive),
    character("Sakazuki", "Akainu", Marine, 0, "Grand Line", Alive),
    character("Borsalino", "Kizaru", Marine, 0, "Grand Line", Alive),
    character("Issho", "Fujitora", Marine, 0, "Grand Line", Alive),
    character("Monkey D. Dragon", "Le Révolutionnaire", Revolutionary, 0, "East Blue", Alive),
    character("Sabo", "La Flamme", Revolutionary, 602_000_000, "East Blue", Alive),
    character("Portgas D. Ace", "Le Poing de Feu", Pirate, 550_000_000, "South Blue", Dead),
    character("Gol D. Roger", "Le Roi des Pirates", Pirate, 5_564_800_000, "East Blue", Dead),
    character("Edward Newgate", "Barbe Blanche", Pirate, 5_046_000_000, "Grand Line", Dead),
    character("Kaido", "La Créature", Pirate, 4_611_100_000, "Grand Line", Alive),
    character("Charlotte Linlin", "Big Mom", Pirate, 4_388_000_000, "Grand Line", Alive),
    character("Dracule Mihawk", "Œil de Faucon", Pirate, 3_590_000_000, "Grand Line", Alive),
    character("Donquixote Doflamingo", "Joker", Pirate, 340_000_000, "North Blue", Alive),
    character("Crocodile", "Sirène", Pirate, 1_965_000_000, "Grand Line", Alive),
];

/// Crew name → captain name.
pub const CAPTAINS: &[(&str, &str)] = &[
    ("Équipage du Chapeau de Paille", "Monkey D. Luffy"),
    ("Équipage de Barbe Rouge", "Edward Newgate"),
    ("Équipage de Barbe Noire", "Marshall D. Teach"),
    ("Équipage du Chapeau de Paille (Heart)", "Trafalgar D. Water Law"),
    ("Équipage de Kid", "Eustass Kid"),
    ("Équipage de Big Mom", "Charlotte Linlin"),
    ("Équipage de Kaido", "Kaido"),
    ("Équipage de Buggy", "Buggy"),
    ("Équipage de Crocodile", "Crocodile"),
    ("Équipage de Donquixote", "Donquixote Doflamingo"),
    ("Équipage de Shanks", "Shanks"),
    ("Équipage de Kuja", "Boa Hancock"),
];

/// Crew name → member names.
pub const MEMBERS: &[(&str, &[&str])] = &[
    (
        "Équipage du Chapeau de Paille",
        &[
            "Monkey D. Luffy",
            "Roronoa Zoro",
            "Nami",
            "Usopp",
            "Sanji",
            "Tony Tony Chopper",
            "Nico Robin",
            "Franky",
            "Brook",
            "Jinbe",
        ],
    ),
    ("Équipage de Barbe Rouge", &["Edward Newgate"]),
    ("Équipage de Barbe Noire", &["Marshall D. Teach"]),
    ("Équipage du Chapeau de Paille (Heart)", &["Trafalgar D. Water Law"]),
    ("Équipage de Kid", &["Eustass Kid"]),
    ("Équipage de Big Mom", &["Charlotte Linlin"]),
    ("Équipage de Kaido", &["Kaido"]),
    ("Équipage de Buggy", &["Buggy"]),
    ("Équipage de Crocodile", &["Crocodile"]),
    ("Équipage de Donquixote", &["Donquixote Doflamingo"]),
    ("Équipage de Shanks", &["Shanks"]),
    ("Équipage de Kuja", &["Boa Hancock"]),
    ("Équipage de Jinbe", &["Jinbe"]),
];

/// Fruit name → current holder name. Holders absent from the character list
/// are skipped.
pub const HOLDERS: &[(&str, &str)] = &[
    ("Gomu Gomu no Mi", "Monkey D. Luffy"),
    ("Mera Mera no Mi", "Portgas D. Ace"),
    ("Magu Magu no Mi", "Sakazuki"),
    ("Pika Pika no Mi", "Borsalino"),
    ("Hana Hana no Mi", "Nico Robin"),
    ("Yami Yami no Mi", "Marshall D. Teach"),
    ("Gura Gura no Mi", "Edward Newgate"),
    ("Ope Ope no Mi", "Trafalgar D. Water Law"),
    ("Mero Mero no Mi", "Boa Hancock"),
    ("Suna Suna no Mi", "Crocodile"),
    ("Ito Ito no Mi", "Donquixote Doflamingo"),
    ("Hito Hito no Mi", "Tony Tony Chopper"),
    ("Soru Soru no Mi", "Charlotte Linlin"),
    ("Yomi Yomi no Mi", "Brook"),
    ("Suke Suke no Mi", "Absalom"),
    ("Bara Bara no Mi", "Buggy"),
];
