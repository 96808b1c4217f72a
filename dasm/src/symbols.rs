use dvm::constants::SYMBOL_CAPACITY;
use log::debug;

/// Symbol names in allocation order; the index is the 8-bit id.
///
/// Labels and branch targets share this table, so a target referenced
/// before its label is defined already has its id when the definition
/// arrives.
#[derive(Debug, Default)]
pub struct SymbolTable {
    names: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    pub fn find(&self, name: &str) -> Option<u8> {
        self.names.iter().position(|n| n == name).map(|i| i as u8)
    }

    /// Id for `name`, allocating the next free one for new names.
    /// `None` once all ids are taken.
    pub fn get_or_create(&mut self, name: &str) -> Option<u8> {
        if let Some(id) = self.find(name) {
            return Some(id);
        }
        if self.names.len() == SYMBOL_CAPACITY {
            return None;
        }
        let id = self.names.len() as u8;
        self.names.push(name.to_owned());
        debug!("assigned symbol '{}' -> {}", name, id);
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Surrenders the names for the image's debug metadata.
    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}
