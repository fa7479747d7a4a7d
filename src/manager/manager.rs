use std::cell::{
    RefCell,
    RefMut
};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{
    debug,
    warn
};

use super::managererror::{
    ManagerError,
    parse_json_value
};
use super::namedobject::NamedJsonObject;

/// A registry of named objects built from JSON.
///
/// `S` is whatever the objects need to be built, such as another registry they
/// refer to by name.
pub trait IManager<V, S> where
    V: Clone {
    fn map(&self) -> RefMut<'_, HashMap<String, V>>;

    fn insert_obj_from_json(&self,
                            json_value: serde_json::Value,
                            supports: &S) -> Result<(), ManagerError>;

    fn get(&self, name: &str) -> Result<V, ManagerError> {
        self.map()
            .get(name)
            .cloned()
            .ok_or_else(|| ManagerError::map_elem_not_found(name))
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map().keys().cloned().collect();
        names.sort();
        names
    }

    fn insert(&self, name: &str, v: V) {
        if self.map().insert(name.to_owned(), v).is_some() {
            warn!("replacing previously registered '{}'", name);
        }
    }

    fn insert_obj_from_json_vec(&self,
                                json_vec: &[serde_json::Value],
                                supports: &S) -> Result<(), ManagerError> {
        for j in json_vec.iter() {
            self.insert_obj_from_json(j.clone(), supports)?;
        }
        Ok(())
    }

    /// Loads one object or an array of objects from a JSON file.
    fn from_reader(&self,
                   file_path: impl AsRef<Path>,
                   supports: &S) -> Result<(), ManagerError> {
        let file = File::open(file_path.as_ref())?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        debug!("loading {}", file_path.as_ref().display());
        if json_value.is_array() {
            let json_array: Vec<serde_json::Value> = parse_json_value(json_value)?;
            self.insert_obj_from_json_vec(&json_array, supports)
        } else {
            self.insert_obj_from_json(json_value, supports)
        }
    }
}

/// Registry whose objects are built from their JSON alone.
pub struct Manager<V> {
    map_cell: RefCell<HashMap<String, V>>,
    get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>
}

impl <V> Manager<V> where
    V: Clone {
    pub fn new(get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>) -> Manager<V> {
        Manager { map_cell: RefCell::new(HashMap::new()), get_obj_from_json }
    }
}

impl <V> IManager<V, ()> for Manager<V> where
    V: Clone {
    fn map(&self) -> RefMut<'_, HashMap<String, V>> {
        self.map_cell.borrow_mut()
    }

    fn insert_obj_from_json(&self,
                            json_value: serde_json::Value,
                            _supports: &()) -> Result<(), ManagerError> {
        let named_object: NamedJsonObject = parse_json_value(json_value.clone())?;
        let v = (self.get_obj_from_json)(json_value)?;
        self.insert(named_object.name(), v);
        debug!("registered '{}'", named_object.name());
        Ok(())
    }
}
