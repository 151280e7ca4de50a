use data_structures::{Arena, HashMap, Id};

use log::trace;

pub type ScopeId = Id<Scope>;

/// The names bound by one block (`as |a b|`), and the slots they were
/// given in the program table.
#[derive(Debug)]
pub struct Scope {
    parent: Option<ScopeId>,
    locals: Vec<String>,
    slots: Vec<u32>,
}

/// Slot allocation for one template. Slot 0 is always `this`; every other
/// symbol gets the next slot in allocation order. Free variables live in a
/// separate, de-duplicated list.
#[derive(Debug)]
pub struct SymbolTable {
    // The memory arena we allocate scopes from
    scopes: Arena<Scope>,
    root: ScopeId,
    symbols: Vec<String>,
    upvars: Vec<String>,
    named: HashMap<String, u32>,
    blocks: HashMap<String, u32>,
    has_eval: bool,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut scopes = Arena::new();
        let root = scopes.alloc(Scope {
            parent: None,
            locals: vec![],
            slots: vec![],
        });
        SymbolTable {
            scopes,
            root,
            symbols: vec![],
            upvars: vec![],
            named: HashMap::default(),
            blocks: HashMap::default(),
            has_eval: false,
        }
    }

    /// The program-level scope. It binds no locals.
    pub fn root(&self) -> ScopeId {
        self.root
    }

    fn scope(&self, id: ScopeId) -> &Scope {
        self.scopes.get(id).expect("scope ids come from this table")
    }

    /// Allocates a fresh slot for `identifier`.
    pub fn allocate(&mut self, identifier: &str) -> u32 {
        self.symbols.push(identifier.to_string());
        let slot = self.symbols.len() as u32;
        trace!("allocated slot {} for {}", slot, identifier);
        slot
    }

    /// Index of `name` in the upvar list, adding it on first use.
    pub fn allocate_free(&mut self, name: &str) -> u32 {
        if let Some(index) = self.upvars.iter().position(|upvar| upvar == name) {
            return index as u32;
        }
        self.upvars.push(name.to_string());
        (self.upvars.len() - 1) as u32
    }

    /// Slot for the named argument `@name`. `name` excludes the sigil.
    pub fn allocate_named(&mut self, name: &str) -> u32 {
        if let Some(slot) = self.named.get(name) {
            return *slot;
        }
        let slot = self.allocate(&format!("@{}", name));
        self.named.insert(name.to_string(), slot);
        slot
    }

    /// Slot for the block `name`. `inverse` and `else` name the same block.
    pub fn allocate_block(&mut self, name: &str) -> u32 {
        let name = if name == "inverse" { "else" } else { name };
        if let Some(slot) = self.blocks.get(name) {
            return *slot;
        }
        let slot = self.allocate(&format!("&{}", name));
        self.blocks.insert(name.to_string(), slot);
        slot
    }

    /// Creates a scope binding `locals` beneath `parent`, allocating one
    /// slot per local.
    pub fn child(&mut self, parent: ScopeId, locals: &[String]) -> ScopeId {
        let slots = locals.iter().map(|local| self.allocate(local)).collect();
        self.scopes.alloc(Scope {
            parent: Some(parent),
            locals: locals.to_vec(),
            slots,
        })
    }

    /// Resolves `name` against `scope` and its ancestors.
    pub fn get(&self, scope: ScopeId, name: &str) -> Option<u32> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(index) = scope.locals.iter().position(|local| local == name) {
                return Some(scope.slots[index]);
            }
            current = scope.parent;
        }
        None
    }

    pub fn has(&self, scope: ScopeId, name: &str) -> bool {
        self.get(scope, name).is_some()
    }

    pub fn slots(&self, scope: ScopeId) -> &[u32] {
        &self.scope(scope).slots
    }

    pub fn locals(&self, scope: ScopeId) -> &[String] {
        &self.scope(scope).locals
    }

    /// Slots of every local visible from `scope`, outermost first. An inner
    /// local that shadows an outer one keeps the outer one's position.
    pub fn eval_info(&self, scope: ScopeId) -> Vec<u32> {
        let mut chain = vec![];
        let mut current = Some(scope);
        while let Some(id) = current {
            chain.push(id);
            current = self.scope(id).parent;
        }

        let mut visible: Vec<(&str, u32)> = vec![];
        for id in chain.into_iter().rev() {
            let scope = self.scope(id);
            for (local, slot) in scope.locals.iter().zip(&scope.slots) {
                match visible.iter_mut().find(|entry| entry.0 == local.as_str()) {
                    Some(entry) => entry.1 = *slot,
                    None => visible.push((local.as_str(), *slot)),
                }
            }
        }
        visible.into_iter().map(|(_, slot)| slot).collect()
    }

    pub fn set_has_eval(&mut self) {
        self.has_eval = true;
    }

    pub fn has_eval(&self) -> bool {
        self.has_eval
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn upvars(&self) -> &[String] {
        &self.upvars
    }

    /// Consumes the table, returning `(symbols, upvars, has_eval)`.
    pub fn into_parts(self) -> (Vec<String>, Vec<String>, bool) {
        (self.symbols, self.upvars, self.has_eval)
    }
}
