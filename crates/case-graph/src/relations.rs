//! Adjacency indices for every association in the graph.
//!
//! Each index owns both directions of its association, so a single call
//! updates both sides. Entities never hold references to each other.

use std::collections::HashMap;
use std::hash::Hash;

use shared_types::{
    AttorneyId, CaseId, ClientId, DocumentId, EventId, InvoiceId, PaymentId, TimeEntryId,
};

/// One parent owning an ordered list of children; each child has at most
/// one parent.
#[derive(Debug, Clone)]
pub(crate) struct OneToMany<P, C> {
    parent_of: HashMap<C, P>,
    children: HashMap<P, Vec<C>>,
}

impl<P: Copy + Eq + Hash, C: Copy + Eq + Hash> OneToMany<P, C> {
    pub fn new() -> Self {
        Self {
            parent_of: HashMap::new(),
            children: HashMap::new(),
        }
    }

    pub fn parent(&self, child: &C) -> Option<P> {
        self.parent_of.get(child).copied()
    }

    pub fn children(&self, parent: &P) -> &[C] {
        self.children.get(parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Link `child` under `parent`, moving it away from any previous parent.
    /// Returns the previous parent when the child actually moved.
    pub fn link(&mut self, parent: P, child: C) -> Option<P> {
        let previous = self.parent(&child);
        if previous == Some(parent) {
            return None;
        }
        if let Some(old) = previous {
            self.remove_from_list(&old, &child);
        }
        self.parent_of.insert(child, parent);
        self.children.entry(parent).or_default().push(child);
        previous
    }

    /// Unlink `child` from `parent`. Returns `false` if `child` is not
    /// currently under `parent`.
    pub fn unlink(&mut self, parent: &P, child: &C) -> bool {
        if self.parent(child).as_ref() != Some(parent) {
            return false;
        }
        self.parent_of.remove(child);
        self.remove_from_list(parent, child);
        true
    }

    /// Unlink `child` from whichever parent it has.
    pub fn release_child(&mut self, child: &C) -> Option<P> {
        let parent = self.parent_of.remove(child)?;
        self.remove_from_list(&parent, child);
        Some(parent)
    }

    /// Orphan every child of `parent`, returning them in their former order.
    pub fn release_parent(&mut self, parent: &P) -> Vec<C> {
        let orphans = self.children.remove(parent).unwrap_or_default();
        for child in &orphans {
            self.parent_of.remove(child);
        }
        orphans
    }

    fn remove_from_list(&mut self, parent: &P, child: &C) {
        if let Some(list) = self.children.get_mut(parent) {
            list.retain(|c| c != child);
            if list.is_empty() {
                self.children.remove(parent);
            }
        }
    }
}

/// Set-semantics association between two entity types, indexed both ways.
#[derive(Debug, Clone)]
pub(crate) struct ManyToMany<L, R> {
    rights: HashMap<L, Vec<R>>,
    lefts: HashMap<R, Vec<L>>,
}

impl<L: Copy + Eq + Hash, R: Copy + Eq + Hash> ManyToMany<L, R> {
    pub fn new() -> Self {
        Self {
            rights: HashMap::new(),
            lefts: HashMap::new(),
        }
    }

    pub fn rights_of(&self, left: &L) -> &[R] {
        self.rights.get(left).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn lefts_of(&self, right: &R) -> &[L] {
        self.lefts.get(right).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, left: &L, right: &R) -> bool {
        self.rights_of(left).contains(right)
    }

    /// Returns `true` if the pair was newly linked.
    pub fn link(&mut self, left: L, right: R) -> bool {
        if self.contains(&left, &right) {
            return false;
        }
        self.rights.entry(left).or_default().push(right);
        self.lefts.entry(right).or_default().push(left);
        true
    }

    /// Returns `true` if the pair was linked and is now unlinked.
    pub fn unlink(&mut self, left: &L, right: &R) -> bool {
        if !self.contains(left, right) {
            return false;
        }
        remove_value(&mut self.rights, left, right);
        remove_value(&mut self.lefts, right, left);
        true
    }

    pub fn release_left(&mut self, left: &L) -> Vec<R> {
        let rights = self.rights.remove(left).unwrap_or_default();
        for right in &rights {
            remove_value(&mut self.lefts, right, left);
        }
        rights
    }

    pub fn release_right(&mut self, right: &R) -> Vec<L> {
        let lefts = self.lefts.remove(right).unwrap_or_default();
        for left in &lefts {
            remove_value(&mut self.rights, left, right);
        }
        lefts
    }
}

fn remove_value<K: Eq + Hash, V: PartialEq>(map: &mut HashMap<K, Vec<V>>, key: &K, value: &V) {
    if let Some(list) = map.get_mut(key) {
        list.retain(|v| v != value);
        if list.is_empty() {
            map.remove(key);
        }
    }
}

/// All association indices of one graph.
#[derive(Debug, Clone)]
pub(crate) struct Relations {
    pub client_cases: OneToMany<ClientId, CaseId>,
    pub client_invoices: OneToMany<ClientId, InvoiceId>,
    pub case_attorneys: ManyToMany<CaseId, AttorneyId>,
    pub case_time_entries: OneToMany<CaseId, TimeEntryId>,
    pub case_documents: OneToMany<CaseId, DocumentId>,
    pub case_events: OneToMany<CaseId, EventId>,
    pub invoice_payments: OneToMany<InvoiceId, PaymentId>,
}

impl Relations {
    pub fn new() -> Self {
        Self {
            client_cases: OneToMany::new(),
            client_invoices: OneToMany::new(),
            case_attorneys: ManyToMany::new(),
            case_time_entries: OneToMany::new(),
            case_documents: OneToMany::new(),
            case_events: OneToMany::new(),
            invoice_payments: OneToMany::new(),
        }
    }
}
