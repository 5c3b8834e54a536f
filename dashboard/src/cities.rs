use canvas::coords::{v2, V2};

use maplit::hashmap;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CityFileError {
    #[error("cannot read city file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse city file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// City identifier → (latitude, longitude). Supplied at startup; cities the
/// table does not know are silently dropped from rendered geometry.
pub struct CityCoords {
    coords: HashMap<String, V2<f64>>,
}

impl CityCoords {
    pub fn builtin() -> CityCoords {
        let coords = hashmap! {
            "Lima".to_string() => v2(-12.0464, -77.0428),
            "Cusco".to_string() => v2(-13.5319, -71.9675),
            "Arequipa".to_string() => v2(-16.409, -71.5375),
            "Trujillo".to_string() => v2(-8.11599, -79.02998),
            "Puno".to_string() => v2(-15.8402, -70.0219),
            "Iquitos".to_string() => v2(-3.7437, -73.2516),
            "Piura".to_string() => v2(-5.1945, -80.6328),
            "Tacna".to_string() => v2(-18.0066, -70.2463),
            "Chiclayo".to_string() => v2(-6.7714, -79.8395),
        };
        CityCoords { coords }
    }

    pub fn from_file(path: &str) -> Result<CityCoords, CityFileError> {
        let file = BufReader::new(File::open(path)?);
        let raw: HashMap<String, [f64; 2]> = serde_json::from_reader(file)?;
        Ok(CityCoords {
            coords: raw
                .into_iter()
                .map(|(city, [lat, lon])| (city, v2(lat, lon)))
                .collect(),
        })
    }

    pub fn get(&self, city: &str) -> Option<V2<f64>> {
        self.coords.get(city).copied()
    }
}
