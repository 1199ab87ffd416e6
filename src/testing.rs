//! In-memory nedb fixtures shared by unit tests.

use std::io::Cursor;

use itertools::Itertools;
use serde_json::{Value, json};

use crate::nedb::{Record, RecordStore};
use crate::pipeline::Database;

pub(crate) fn store(name: &str, records: &[Value]) -> RecordStore {
    let text = records.iter().map(Value::to_string).join("\n");
    RecordStore::from_reader(Cursor::new(text), name).expect("fixture store should parse")
}

pub(crate) fn record(value: Value) -> Record {
    match value {
        Value::Object(record) => record,
        other => panic!("fixture is not an object: {other}"),
    }
}

pub(crate) fn stat_block() -> Value {
    json!({
        "hp": 69, "hp_max": 79,
        "fire": 0, "fire_max": 39,
        "torpedo": 0, "torpedo_max": 0,
        "aa": 28, "aa_max": 69,
        "armor": 28, "armor_max": 59,
        "asw": 0, "asw_max": 0,
        "evasion": 27, "evasion_max": 49,
        "los": 44, "los_max": 69,
        "luck": 12, "luck_max": 59,
        "speed": 10, "range": 1, "carry": 82
    })
}

pub(crate) fn akagi() -> Value {
    json!({
        "id": 83,
        "no": 6,
        "name": {"ja_jp": "赤城", "ja_kana": "あかぎ", "zh_cn": "赤城", "suffix": null},
        "type": 11,
        "class": 3,
        "class_no": 1,
        "rare": 5,
        "stat": stat_block(),
        "slot": [18, 18, 27, 10],
        "equip": [20, 23, 16, ""],
        "consum": {"fuel": 75, "ammo": 75},
        "modernization": [0, 0, 2, 2],
        "scrap": [2, 4, 11, 1],
        "buildtime": 240,
        "remodel": {"next": 277, "next_lvl": 30},
        "rels": {"cv": 10, "illustrator": 20}
    })
}

pub(crate) fn akagi_kai() -> Value {
    json!({
        "id": 277,
        "no": 278,
        "name": {"ja_jp": "赤城", "ja_kana": "あかぎ", "zh_cn": "赤城", "suffix": 1},
        "type": 11,
        "class": 3,
        "class_no": 1,
        "rare": 6,
        "stat": stat_block(),
        "slot": [20, 20, 32, 10],
        "equip": [],
        "consum": {"fuel": 80, "ammo": 80},
        "modernization": [0, 0, 3, 3],
        "scrap": [3, 5, 16, 3],
        "buildtime": null,
        "illust_same_as_prev": true,
        "remodel": {"prev": 83}
    })
}

pub(crate) fn iona() -> Value {
    json!({
        "id": 9181,
        "no": 9181,
        "name": {"ja_jp": "イオナ", "ja_kana": "いおな", "zh_cn": "伊欧娜", "suffix": null},
        "type": 27,
        "class": 13,
        "class_no": null,
        "stat": stat_block(),
        "slot": [0, 0],
        "equip": [],
        "consum": {"fuel": 50, "ammo": 50},
        "modernization": [5, 5, 5, 5],
        "scrap": [9, 9, 9, 9],
        "buildtime": 20,
        "remodel": {},
        "rels": {"cv": 10}
    })
}

/// Akagi, her remodel and Iona, in an order where Akagi's remodel target
/// comes after her.
pub(crate) fn database() -> Database {
    Database {
        ships: store("ships.nedb", &[akagi(), akagi_kai(), iona()]),
        entities: store(
            "entities.nedb",
            &[
                json!({"id": 10, "name": {"ja_jp": "藤田咲", "zh_cn": "藤田咲"}}),
                json!({"id": 20, "name": {"ja_jp": "コニシ", "zh_cn": "小西"}}),
            ],
        ),
        name_suffixes: store(
            "ship_namesuffix.nedb",
            &[
                json!({"id": 1, "ja_jp": "改", "ja_romaji": "kai", "zh_cn": "改"}),
                json!({"id": 2, "ja_jp": "改二", "ja_romaji": "kai ni", "zh_cn": "改二"}),
            ],
        ),
        classes: store(
            "ship_classes.nedb",
            &[
                json!({"id": 3, "name": {"ja_jp": "赤城型", "zh_cn": "赤城级"}}),
                json!({"id": 13, "name": {"ja_jp": "霧の艦隊", "zh_cn": "雾之舰队"}}),
            ],
        ),
    }
}
