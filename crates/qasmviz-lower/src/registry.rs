//! Qubit allocation and register bindings.

use qasmviz_circuit::{Qubit, QubitId};
use rustc_hash::FxHashMap;

use crate::error::{LowerError, LowerResult};

/// Most qubits a single program may declare.
pub const MAX_QUBITS: usize = 1 << 20;

/// What a register name is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Binding {
    /// `qreg q;`
    Scalar(QubitId),
    /// `qreg q[n];`
    Array(Vec<QubitId>),
}

/// Allocates qubits and maps declared register names to them.
///
/// Qubits live in an arena indexed by id; bindings refer to them by id only.
#[derive(Debug, Default)]
pub struct QubitRegistry {
    qubits: Vec<Qubit>,
    bindings: FxHashMap<String, Binding>,
}

impl QubitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh qubit with the next sequential id.
    #[allow(clippy::cast_possible_truncation)]
    pub fn allocate(&mut self) -> QubitId {
        // Capacity is checked by the declaring methods.
        let id = QubitId(self.qubits.len() as u32);
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Bind `name` to one fresh qubit.
    pub fn declare_scalar(&mut self, name: &str) -> LowerResult<QubitId> {
        self.check_fresh(name, 1)?;
        let id = self.allocate();
        self.bindings.insert(name.to_string(), Binding::Scalar(id));
        Ok(id)
    }

    /// Bind `name` to `count` fresh qubits.
    pub fn declare_array(&mut self, name: &str, count: usize) -> LowerResult<Vec<QubitId>> {
        self.check_fresh(name, count)?;
        let ids: Vec<_> = (0..count).map(|_| self.allocate()).collect();
        self.bindings.insert(name.to_string(), Binding::Array(ids.clone()));
        Ok(ids)
    }

    /// Look up a declared register, optionally indexed.
    ///
    /// Scalar registers must be referenced without an index and sized
    /// registers with one.
    pub fn resolve(&self, name: &str, index: Option<usize>) -> LowerResult<QubitId> {
        let binding = self
            .bindings
            .get(name)
            .ok_or_else(|| LowerError::UndeclaredRegister(name.to_string()))?;

        match (binding, index) {
            (Binding::Scalar(id), None) => Ok(*id),
            (Binding::Scalar(_), Some(i)) => Err(LowerError::IndexOutOfRange {
                register: name.to_string(),
                detail: format!("index {i} given for a single-qubit register"),
            }),
            (Binding::Array(ids), Some(i)) => {
                ids.get(i)
                    .copied()
                    .ok_or_else(|| LowerError::IndexOutOfRange {
                        register: name.to_string(),
                        detail: format!("index {i} out of bounds for size {}", ids.len()),
                    })
            }
            (Binding::Array(ids), None) => Err(LowerError::IndexOutOfRange {
                register: name.to_string(),
                detail: format!("missing index for register of size {}", ids.len()),
            }),
        }
    }

    /// Record a classical result on a qubit.
    pub fn mark_measured(&mut self, id: QubitId) {
        if let Some(qubit) = self.qubits.get_mut(id.0 as usize) {
            qubit.mark_measured();
        }
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// The allocated qubits, in allocation order.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the number of allocated qubits.
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// Check whether no qubit has been allocated.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Hand off the qubit arena.
    pub fn into_qubits(self) -> Vec<Qubit> {
        self.qubits
    }

    fn check_fresh(&self, name: &str, count: usize) -> LowerResult<()> {
        if self.contains(name) {
            return Err(LowerError::DuplicateDeclaration(name.to_string()));
        }
        if count > MAX_QUBITS - self.qubits.len() {
            return Err(LowerError::InvalidDesignator(format!(
                "register '{name}' of size {count} exceeds the limit of {MAX_QUBITS} qubits"
            )));
        }
        Ok(())
    }
}
