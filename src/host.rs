use std::collections::HashMap;
use std::fmt;

/// A native callout. Receives the data stack storage and the current
/// stack pointer (index of the next free slot).
pub type HostFn = Box<dyn FnMut(&mut [f64], u32)>;

/// Host functions registered on a VM, keyed by their 8-bit id.
///
/// Registration must complete before the VM enters `run`; during execution
/// the registry is only looked up, never mutated.
#[derive(Default)]
pub struct HostRegistry {
    functions: HashMap<u8, HostFn>,
}

impl HostRegistry {
    pub fn new() -> HostRegistry {
        HostRegistry::default()
    }

    /// Installs `function` under `id`, replacing any previous entry.
    pub fn register<F>(&mut self, id: u8, function: F)
    where
        F: FnMut(&mut [f64], u32) + 'static,
    {
        self.functions.insert(id, Box::new(function));
    }

    pub fn contains(&self, id: u8) -> bool {
        self.functions.contains_key(&id)
    }

    pub fn get_mut(&mut self, id: u8) -> Option<&mut HostFn> {
        self.functions.get_mut(&id)
    }
}

impl fmt::Debug for HostRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HostRegistry")
            .field("ids", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}
