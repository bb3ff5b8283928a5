// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::host::Instance;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(0);

/// A class defined by the host environment.
///
/// The slot layout is whatever the host declared, in declaration order.  The native layer may
/// later restrict the class in two one-way steps: individual slots become write-protected for
/// host code, and the host-level constructor goes away.  Neither step can be undone.
#[derive(Debug)]
pub struct HostClass {
    //unique for the life of the process, never reused
    id: u64,
    name: String,
    layout: Option<Box<[String]>>,
    //one flag per declared slot
    protected: Box<[AtomicBool]>,
    constructible: AtomicBool,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConstructorError {
    #[error("cannot create '{class}' instances")]
    Removed { class: String },
}

impl HostClass {
    /// Defines a class with the given ordered slot names.
    pub fn new<I, S>(name: impl Into<String>, slots: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let layout: Box<[String]> = slots.into_iter().map(Into::into).collect();
        let protected = layout.iter().map(|_| AtomicBool::new(false)).collect();
        Arc::new(HostClass {
            id: NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            layout: Some(layout),
            protected,
            constructible: AtomicBool::new(true),
        })
    }

    /// Defines a class that has no slot layout at all, e.g. a plain function or a class using
    /// a per-instance dictionary.
    pub fn without_layout(name: impl Into<String>) -> Arc<Self> {
        Arc::new(HostClass {
            id: NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            layout: None,
            protected: Box::new([]),
            constructible: AtomicBool::new(true),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn layout(&self) -> Option<&[String]> {
        self.layout.as_deref()
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.layout.as_ref().map_or(0, |l| l.len())
    }

    /// Generic attribute lookup: finds a slot by name.
    pub fn slot_index(&self, name: &str) -> Option<usize> {
        self.layout.as_ref()?.iter().position(|s| s == name)
    }

    /// Whether host-level assignment to the slot at `index` is rejected.
    pub fn is_protected(&self, index: usize) -> bool {
        self.protected
            .get(index)
            .is_some_and(|p| p.load(Ordering::Acquire))
    }

    pub(crate) fn protect_slot(&self, index: usize) {
        self.protected[index].store(true, Ordering::Release);
    }

    pub fn is_constructible(&self) -> bool {
        self.constructible.load(Ordering::Acquire)
    }

    pub(crate) fn remove_constructor(&self) {
        self.constructible.store(false, Ordering::Release);
    }

    /// The host-level constructor.
    ///
    /// Produces an instance with every slot unset.  Fails once the native layer has taken over
    /// construction of this class.
    pub fn instantiate(self: &Arc<Self>) -> Result<Arc<Instance>, ConstructorError> {
        if !self.is_constructible() {
            return Err(ConstructorError::Removed {
                class: self.name.clone(),
            });
        }
        Ok(Arc::new(Instance::allocate(self.clone())))
    }
}
