//! Pluggable gate-set catalog.
//!
//! A [`GateSet`] tells the search driver two things: what the circuit looks
//! like before any search layer is appended (`initial_layer`), and what
//! layers it is allowed to append next at a given register size
//! (`search_layers`). The driver and solver never construct gates directly
//! — every candidate circuit bottoms out in a `GateSet` call, so swapping in
//! a different hardware's native gates means writing a new `GateSet` impl,
//! not touching the search loop.

use std::sync::Arc;

use synth_ir::GateNode;

/// One candidate layer the search driver may append to a frontier node,
/// paired with the weight (additional circuit cost) it contributes.
#[derive(Debug, Clone)]
pub struct SearchLayer {
    /// The gate subtree to append.
    pub gate: Arc<GateNode>,
    /// Cost contribution used by the search heuristic (§4.7); larger-weight
    /// layers are explored as if they were proportionally deeper.
    pub weight: f64,
}

/// A catalog of gates available to the search driver for a fixed qudit
/// dimension `d`.
pub trait GateSet: Send + Sync {
    /// Qudit dimension this gate set's primitives are expressed over.
    fn d(&self) -> usize;

    /// The circuit the search tree is rooted at, for an `n`-qudit target.
    fn initial_layer(&self, n: usize) -> Arc<GateNode>;

    /// Layers reachable by appending a single step to any node in the
    /// search tree, for an `n`-qudit target. Returns an empty vector if `n`
    /// is too small for this gate set to branch at all (the driver reports
    /// this as `GatesetHasNoBranching`, see synth-search).
    fn search_layers(&self, n: usize) -> Vec<SearchLayer>;
}

/// Reference qubit (`d = 2`) gate set: one ZXZXZ single-qubit rotation per
/// qudit as the initial layer, and for every ordered pair of distinct
/// qubits a CNOT sandwiched by a fresh single-qubit rotation on each,
/// mirroring the default gate sets used by the scenarios this synthesizer
/// is benchmarked against.
#[derive(Debug, Clone, Copy, Default)]
pub struct QubitGateSet;

impl GateSet for QubitGateSet {
    fn d(&self) -> usize {
        2
    }

    fn initial_layer(&self, n: usize) -> Arc<GateNode> {
        if n == 0 {
            return Arc::new(GateNode::Identity { dim: 1 });
        }
        let qubits = (0..n).map(|_| Arc::new(GateNode::SingleQubit)).collect();
        Arc::new(GateNode::kronecker(qubits).expect("n > 0 guarantees non-empty children"))
    }

    fn search_layers(&self, n: usize) -> Vec<SearchLayer> {
        if n < 2 {
            return Vec::new();
        }
        let mut layers = Vec::with_capacity(n * (n - 1));
        for control in 0..n {
            for target in 0..n {
                if control == target {
                    continue;
                }
                let cnot = Arc::new(GateNode::NonadjacentCnot { n, control, target });
                let single_c = Arc::new(GateNode::SingleQubit);
                let single_t = Arc::new(GateNode::SingleQubit);
                let dressed = dress_two_qubit_gate(n, control, target, cnot, single_c, single_t);
                layers.push(SearchLayer {
                    gate: Arc::new(dressed),
                    weight: 1.0,
                });
            }
        }
        layers
    }
}

/// Wrap a fixed `control`/`target` 2-qudit gate so it acts on the full
/// `n`-qubit register, with a fresh single-qubit rotation appended on both
/// the control and target lines.
fn dress_two_qubit_gate(
    n: usize,
    control: usize,
    target: usize,
    two_qubit: Arc<GateNode>,
    single_c: Arc<GateNode>,
    single_t: Arc<GateNode>,
) -> GateNode {
    let dressing = {
        let mut children: Vec<Arc<GateNode>> = Vec::with_capacity(n);
        for q in 0..n {
            if q == control {
                children.push(Arc::clone(&single_c));
            } else if q == target {
                children.push(Arc::clone(&single_t));
            } else {
                children.push(Arc::new(GateNode::Identity { dim: 2 }));
            }
        }
        GateNode::kronecker(children).expect("n > 0 guarantees non-empty children")
    };

    GateNode::product(vec![two_qubit, Arc::new(dressing)])
        .expect("both sides act on the same n-qubit register")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_layer_widens_with_register_size() {
        let gs = QubitGateSet;
        assert_eq!(gs.initial_layer(3).width(), 3);
        assert_eq!(gs.initial_layer(3).dim(), 8);
    }

    #[test]
    fn search_layers_cover_every_ordered_pair() {
        let gs = QubitGateSet;
        let layers = gs.search_layers(3);
        assert_eq!(layers.len(), 3 * 2);
        for layer in &layers {
            assert_eq!(layer.gate.width(), 3);
            assert_eq!(layer.weight, 1.0);
        }
    }

    #[test]
    fn two_qubit_register_has_no_branching_below_it() {
        let gs = QubitGateSet;
        assert!(gs.search_layers(1).is_empty());
        assert!(gs.search_layers(0).is_empty());
    }
}
