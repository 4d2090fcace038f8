use indexmap::{IndexMap, IndexSet};

/// Bijection between wire names and dense variable ids, in first-seen order.
///
/// Ids start at 1 so that they can be used directly as CNF variables. An id is
/// never reused or renumbered for the lifetime of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireTable {
    ids: IndexMap<String, u32>,
    inputs: IndexSet<u32>,
}

impl WireTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, minting the next one if the name is new.
    pub fn get_or_insert(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.ids.len() as u32 + 1;
        self.ids.insert(name.to_owned(), id);
        id
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        let idx = (id as usize).checked_sub(1)?;
        self.ids.get_index(idx).map(|(name, _)| name.as_str())
    }

    /// Registers `name` as a circuit input and returns its id. Declaring the
    /// same input twice is a no-op.
    pub fn declare_input(&mut self, name: &str) -> u32 {
        let id = self.get_or_insert(name);
        self.inputs.insert(id);
        id
    }

    pub fn is_input(&self, id: u32) -> bool {
        self.inputs.contains(&id)
    }

    /// Input wires in declaration order.
    pub fn inputs(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.inputs
            .iter()
            .filter_map(|&id| self.name(id).map(|name| (name, id)))
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
