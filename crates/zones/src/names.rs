//! # Zone Name Table
//!
//! Static short/long names indexed by numeric zone id. Blank rows are ids
//! the table has no name for; they resolve to the same placeholder as ids
//! past the end of the table.

use seq_core::ZoneId;

/// One row of the zone table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneNames {
    pub short_name: &'static str,
    pub long_name: &'static str,
}

impl ZoneNames {
    const fn new(short_name: &'static str, long_name: &'static str) -> Self {
        Self {
            short_name,
            long_name,
        }
    }
}

//=== Zone Table ===//

static ZONE_NAMES: &[ZoneNames] = &[
    ZoneNames::new("unknown0", "Unknown Zone"), // 0
    ZoneNames::new("qeynos", "South Qeynos"), // 1
    ZoneNames::new("qeynos2", "North Qeynos"), // 2
    ZoneNames::new("qrg", "Surefall Glade"), // 3
    ZoneNames::new("qeytoqrg", "Qeynos Hills"), // 4
    ZoneNames::new("highpass", "Highpass Hold"), // 5
    ZoneNames::new("highkeep", "High Keep"), // 6
    ZoneNames::new("", ""), // 7
    ZoneNames::new("freportn", "North Freeport"), // 8
    ZoneNames::new("freportw", "West Freeport"), // 9
    ZoneNames::new("freporte", "East Freeport"), // 10
    ZoneNames::new("runnyeye", "Clan RunnyEye"), // 11
    ZoneNames::new("qey2hh1", "West Karana"), // 12
    ZoneNames::new("northkarana", "North Karana"), // 13
    ZoneNames::new("southkarana", "South Karana"), // 14
    ZoneNames::new("eastkarana", "East Karana"), // 15
    ZoneNames::new("beholder", "Gorge of King Xorbb"), // 16
    ZoneNames::new("blackburrow", "BlackBurrow"), // 17
    ZoneNames::new("paw", "Infected Paw"), // 18
    ZoneNames::new("rivervale", "Rivervale"), // 19
    ZoneNames::new("kithicor", "Kithicor Forest"), // 20
    ZoneNames::new("commons", "West Commonlands"), // 21
    ZoneNames::new("ecommons", "East Commonlands"), // 22
    ZoneNames::new("erudnint", "Erudin Palace"), // 23
    ZoneNames::new("erudnext", "Erudin"), // 24
    ZoneNames::new("nektulos", "Nektulos Forest"), // 25
    ZoneNames::new("cshome", "Sunset Home"), // 26
    ZoneNames::new("lavastorm", "Lavastorm Mountains"), // 27
    ZoneNames::new("nektropos", "Nektropos"), // 28
    ZoneNames::new("halas", "Halas"), // 29
    ZoneNames::new("everfrost", "Everfrost Peaks"), // 30
    ZoneNames::new("soldunga", "Solusek's Eye"), // 31
    ZoneNames::new("soldungb", "Nagafen's Lair"), // 32
    ZoneNames::new("misty", "Misty Thicket"), // 33
    ZoneNames::new("nro", "North Ro"), // 34
    ZoneNames::new("sro", "South Ro"), // 35
    ZoneNames::new("befallen", "Befallen"), // 36
    ZoneNames::new("oasis", "Oasis of Marr"), // 37
    ZoneNames::new("tox", "Toxxulia Forest"), // 38
    ZoneNames::new("hole", "The Ruins of Old Paineel"), // 39
    ZoneNames::new("neriaka", "Neriak Foreign Quarter"), // 40
    ZoneNames::new("neriakb", "Neriak Commons"), // 41
    ZoneNames::new("neriakc", "Neriak Third Gate"), // 42
    ZoneNames::new("neriakd", "Neriak Palace"), // 43
    ZoneNames::new("najena", "Najena"), // 44
    ZoneNames::new("qcat", "Qeynos Catacombs"), // 45
    ZoneNames::new("innothule", "Innothule Swamp"), // 46
    ZoneNames::new("feerrott", "The Feerrott"), // 47
    ZoneNames::new("cazicthule", "Cazic-Thule"), // 48
    ZoneNames::new("oggok", "Oggok"), // 49
    ZoneNames::new("rathemtn", "Rathe Mountains"), // 50
    ZoneNames::new("lakerathe", "Lake Rathetear"), // 51
    ZoneNames::new("grobb", "Grobb"), // 52
    ZoneNames::new("aviak", "Aviak Village"), // 53
    ZoneNames::new("gfaydark", "Greater Faydark"), // 54
    ZoneNames::new("akanon", "Ak'Anon"), // 55
    ZoneNames::new("steamfont", "Steamfont Mountains"), // 56
    ZoneNames::new("lfaydark", "Lesser Faydark"), // 57
    ZoneNames::new("crushbone", "Clan Crushbone"), // 58
    ZoneNames::new("mistmoore", "Castle Mistmoore"), // 59
    ZoneNames::new("kaladima", "Kaladim"), // 60
    ZoneNames::new("felwithea", "Felwithe"), // 61
    ZoneNames::new("felwitheb", "Felwithe"), // 62
    ZoneNames::new("unrest", "Estate of Unrest"), // 63
    ZoneNames::new("kedge", "Kedge Keep"), // 64
    ZoneNames::new("guktop", "Upper Guk"), // 65
    ZoneNames::new("gukbottom", "Lower Guk"), // 66
    ZoneNames::new("kaladimb", "Kaladim"), // 67
    ZoneNames::new("butcher", "Butcherblock Mountains"), // 68
    ZoneNames::new("oot", "Ocean of Tears"), // 69
    ZoneNames::new("cauldron", "Dagnor's Cauldron"), // 70
    ZoneNames::new("airplane", "Plane of Sky"), // 71
    ZoneNames::new("fearplane", "Plane of Fear"), // 72
    ZoneNames::new("permafrost", "Permafrost Keep"), // 73
    ZoneNames::new("kerraridge", "Kerra Isle"), // 74
    ZoneNames::new("paineel", "Paineel"), // 75
    ZoneNames::new("hateplane", "The Plane of Hate"), // 76
    ZoneNames::new("arena", "The Arena"), // 77
    ZoneNames::new("fieldofbone", "The Field of Bone"), // 78
    ZoneNames::new("warslikswood", "Warsliks Wood"), // 79
    ZoneNames::new("soltemple", "Temple of Solusek Ro"), // 80
    ZoneNames::new("droga", "Temple of Droga"), // 81
    ZoneNames::new("cabwest", "West Cabilis"), // 82
    ZoneNames::new("swampofnohope", "Swamp of No Hope"), // 83
    ZoneNames::new("firiona", "Firiona Vie"), // 84
    ZoneNames::new("lakeofillomen", "Lake of Ill Omen"), // 85
    ZoneNames::new("dreadlands", "Dreadlands"), // 86
    ZoneNames::new("burningwood", "Burning Woods"), // 87
    ZoneNames::new("kaesora", "Kaesora"), // 88
    ZoneNames::new("sebilis", "Old Sebilis"), // 89
    ZoneNames::new("citymist", "City of Mist"), // 90
    ZoneNames::new("skyfire", "Skyfire Mountains"), // 91
    ZoneNames::new("frontiermtns", "Frontier Mountains"), // 92
    ZoneNames::new("overthere", "The Overthere"), // 93
    ZoneNames::new("emeraldjungle", "The Emerald Jungle"), // 94
    ZoneNames::new("trakanon", "Trakanon's Teeth"), // 95
    ZoneNames::new("timorous", "Timorous Deep"), // 96
    ZoneNames::new("kurn", "Kurn's Tower"), // 97
    ZoneNames::new("erudsxing", "Erud's Crossing"), // 98
    ZoneNames::new("", ""), // 99
    ZoneNames::new("stonebrunt", "Stonebrunt Mountains"), // 100
    ZoneNames::new("warrens", "The Warrens"), // 101
    ZoneNames::new("karnor", "Karnor's Castle"), // 102
    ZoneNames::new("chardok", "Chardok"), // 103
    ZoneNames::new("dalnir", "Dalnir"), // 104
    ZoneNames::new("charasis", "Howling Stones"), // 105
    ZoneNames::new("cabeast", "East Cabilis"), // 106
    ZoneNames::new("nurga", "Mines of Nurga"), // 107
    ZoneNames::new("veeshan", "Veeshan's Peak"), // 108
    ZoneNames::new("veksar", "Veksar"), // 109
    ZoneNames::new("iceclad", "Iceclad Ocean"), // 110
    ZoneNames::new("frozenshadow", "Tower of Frozen Shadow"), // 111
    ZoneNames::new("velketor", "Velketor's Labyrinth"), // 112
    ZoneNames::new("kael", "Kael Drakkal"), // 113
    ZoneNames::new("skyshrine", "Skyshrine"), // 114
    ZoneNames::new("thurgadina", "Thurgadin"), // 115
    ZoneNames::new("eastwastes", "Eastern Wastes"), // 116
    ZoneNames::new("cobaltscar", "Cobalt Scar"), // 117
    ZoneNames::new("greatdivide", "Great Divide"), // 118
    ZoneNames::new("wakening", "The Wakening Land"), // 119
    ZoneNames::new("westwastes", "Western Wastes"), // 120
    ZoneNames::new("crystal", "Crystal Caverns"), // 121
    ZoneNames::new("", ""), // 122
    ZoneNames::new("necropolis", "Dragon Necropolis"), // 123
    ZoneNames::new("templeveeshan", "Temple of Veeshan"), // 124
    ZoneNames::new("sirens", "Siren's Grotto"), // 125
    ZoneNames::new("mischiefplane", "Plane of Mischief"), // 126
    ZoneNames::new("growthplane", "Plane of Growth"), // 127
    ZoneNames::new("sleeper", "Sleeper's Tomb"), // 128
    ZoneNames::new("thurgadinb", "Icewell Keep"), // 129
    ZoneNames::new("erudsxing2", "Marauder's Mire"), // 130
];

fn lookup(zone_id: ZoneId) -> Option<&'static ZoneNames> {
    ZONE_NAMES
        .get(usize::from(zone_id.get()))
        .filter(|names| !names.short_name.is_empty())
}

/// Placeholder used for both names of an unmapped zone id
pub fn placeholder_name(zone_id: ZoneId) -> String {
    format!("unk_zone_{}", zone_id)
}

/// Short name for a zone id, or `unk_zone_<id>`
pub fn zone_name_from_id(zone_id: ZoneId) -> String {
    match lookup(zone_id) {
        Some(names) => names.short_name.to_string(),
        None => placeholder_name(zone_id),
    }
}

/// Long name for a zone id, or `unk_zone_<id>`
pub fn zone_long_name_from_id(zone_id: ZoneId) -> String {
    match lookup(zone_id) {
        Some(names) => names.long_name.to_string(),
        None => placeholder_name(zone_id),
    }
}

/// Number of rows in the zone table, blank rows included
pub fn table_len() -> usize {
    ZONE_NAMES.len()
}

/// Remove a trailing `_<digits>` instance suffix
///
/// Instanced zones arrive as e.g. `mmca_262`. A name that is only digits
/// after the underscore is left alone when nothing would remain before it.
pub fn strip_instance_suffix(name: &str) -> &str {
    match name.rfind('_') {
        Some(pos)
            if pos > 0
                && pos + 1 < name.len()
                && name[pos + 1..].bytes().all(|b| b.is_ascii_digit()) =>
        {
            &name[..pos]
        }
        _ => name,
    }
}
