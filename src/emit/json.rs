use std::io::{self, Write};

use crate::ship::ShipRecord;

use super::ShipEmitter;

/// One JSON object per line.
pub struct JsonLines<W> {
    writer: W,
}

impl<W: Write> JsonLines<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ShipEmitter for JsonLines<W> {
    fn emit(&mut self, ship: &ShipRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, ship)?;
        writeln!(self.writer)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod test {
    use serde_json::{Value, json};

    use super::*;
    use crate::pipeline::Converter;
    use crate::tables::Tables;
    use crate::testing::database;

    #[test]
    fn writes_flat_kcwiki_fields() {
        let db = database();
        let tables = Tables::standard();
        let converter = Converter::new(&db, &tables).unwrap();

        let mut lines = JsonLines::new(Vec::new());
        converter.run(&mut lines).unwrap();
        let text = String::from_utf8(lines.into_inner()).unwrap();
        let ships: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(ships.len(), 3);
        let akagi = &ships[0];
        assert_eq!(akagi["kcwiki_id"], "006");
        assert_eq!(akagi["ja_jp"], "赤城");
        assert_eq!(akagi["type"], 18);
        assert_eq!(akagi["hp"], json!([69, 79]));
        assert_eq!(akagi["class"], json!({"name": "赤城级", "number": 1}));
        assert_eq!(
            akagi["modernization"],
            json!({"fire": 0, "torpedo": 0, "aa": 2, "armor": 2})
        );
        assert_eq!(akagi["remodel"], json!({"level": 30, "next_kcwiki_id": "006a"}));

        let iona = &ships[2];
        assert!(iona.get("rare").is_none());
        assert!(iona.get("remodel").is_none());
        assert_eq!(
            iona["get_method"],
            json!({"drop": -1, "remodel": -1, "build": -1, "buildtime": -1})
        );
    }
}
