use std::collections::BTreeMap;

use json_model::{Fields, Model, OneOf2};

#[derive(Debug, Default)]
struct Sensor {
    name: String,
    reading: OneOf2<f64, String>,
}

impl Model for Sensor {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .required("name", |m| &m.name, |m| &mut m.name)
            .required("reading", |m| &m.reading, |m| &mut m.reading);
    }
}

#[derive(Debug, Default)]
struct Station {
    id: u64,
    sensors: Vec<Box<Sensor>>,
    labels: BTreeMap<String, String>,
    retired: Option<bool>,
}

impl Model for Station {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .required("id", |m| &m.id, |m| &mut m.id)
            .required("sensors", |m| &m.sensors, |m| &mut m.sensors)
            .required("labels", |m| &m.labels, |m| &mut m.labels)
            .optional("retired", |m| &m.retired, |m| &mut m.retired);
    }
}

fn main() {
    let text = r#"{
        "id": 7,
        "sensors": [
            {"name": "temp", "reading": 21.5},
            {"name": "door", "reading": "open"}
        ],
        "labels": {"site": "north"}
    }"#;

    let station = match Station::parse(text) {
        Ok(station) => station,
        Err(err) => {
            eprintln!("{}", err.prettified());
            std::process::exit(1);
        }
    };
    println!("{}", station.to_json());

    for info in Station::describe() {
        println!("{}: {}", info.key, info.shape);
    }

    let broken = r#"{"id": 7, "sensors": [{"name": "temp", "reading": true}], "labels": {}}"#;
    if let Err(err) = Station::parse(broken) {
        println!("{}", err.prettified());
    }
}
