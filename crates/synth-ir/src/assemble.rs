//! Turns an evaluated circuit tree into a flat, human/tool-readable record
//! of which gate acts on which qudits with which parameters — the "circuit
//! assembly output" external interface.
//!
//! `Product` children are concatenated in order at the same base qudit;
//! `Kronecker` children are placed side by side, each shifted by the total
//! width of the children before it. This mirrors how the two composition
//! modes differ only in whether qudit offsets advance between children.

use crate::error::{IrError, IrResult};
use crate::node::GateNode;

/// One entry of the assembled output: either a concrete gate application or
/// a nested block (kept nested so callers can tell `Kronecker`-parallel
/// structure apart from `Product`-sequential structure if they want to).
#[derive(Debug, Clone, PartialEq)]
pub enum AssembledRecord {
    /// A leaf gate applied to specific qudits with specific parameters.
    Gate {
        /// Gate name (`"U"`, `"CNOT"`, ...).
        name: &'static str,
        /// Parameters consumed by this gate, in order.
        params: Vec<f64>,
        /// Qudit indices this gate acts on, in the node's own axis order.
        qudits: Vec<usize>,
    },
    /// A nested sequential block (from a `Product`).
    Sequential(Vec<AssembledRecord>),
    /// A nested parallel block (from a `Kronecker`).
    Parallel(Vec<AssembledRecord>),
}

/// Assemble `node` at the given parameters, with `base_qudit` as the index
/// of its first qudit in the surrounding register.
pub fn assemble(node: &GateNode, theta: &[f64], base_qudit: usize) -> IrResult<AssembledRecord> {
    if theta.len() != node.arity() {
        return Err(IrError::ArityMismatch {
            expected: node.arity(),
            got: theta.len(),
        });
    }
    Ok(assemble_unchecked(node, theta, base_qudit))
}

fn assemble_unchecked(node: &GateNode, theta: &[f64], base_qudit: usize) -> AssembledRecord {
    match node {
        GateNode::Kronecker(children) => {
            let mut offset = base_qudit;
            let mut theta_offset = 0;
            let mut records = Vec::with_capacity(children.len());
            for child in children {
                let arity = child.arity();
                records.push(assemble_unchecked(
                    child,
                    &theta[theta_offset..theta_offset + arity],
                    offset,
                ));
                offset += child.width();
                theta_offset += arity;
            }
            AssembledRecord::Parallel(records)
        }
        GateNode::Product(children) => {
            let mut theta_offset = 0;
            let mut records = Vec::with_capacity(children.len());
            for child in children {
                let arity = child.arity();
                records.push(assemble_unchecked(
                    child,
                    &theta[theta_offset..theta_offset + arity],
                    base_qudit,
                ));
                theta_offset += arity;
            }
            AssembledRecord::Sequential(records)
        }
        GateNode::Controlled { inner, .. } => {
            let inner_record = assemble_unchecked(inner, theta, base_qudit + 1);
            AssembledRecord::Sequential(vec![
                AssembledRecord::Gate {
                    name: "ctrl-on",
                    params: Vec::new(),
                    qudits: vec![base_qudit],
                },
                inner_record,
            ])
        }
        GateNode::Invert(inner) => {
            let mut inner_record = assemble_unchecked(inner, theta, base_qudit);
            mark_inverted(&mut inner_record);
            inner_record
        }
        GateNode::Remap {
            inner,
            source,
            target,
            ..
        } => {
            let _ = source;
            assemble_unchecked(inner, theta, *target)
        }
        leaf => {
            let width = leaf.width();
            AssembledRecord::Gate {
                name: leaf.name(),
                params: theta.to_vec(),
                qudits: (base_qudit..base_qudit + width).collect(),
            }
        }
    }
}

fn mark_inverted(record: &mut AssembledRecord) {
    match record {
        AssembledRecord::Gate { name, .. } => *name = "inv",
        AssembledRecord::Sequential(children) | AssembledRecord::Parallel(children) => {
            for child in children {
                mark_inverted(child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn leaf_gate_reports_its_own_qudits() {
        let node = GateNode::SingleQubit;
        let record = assemble(&node, &[0.1, 0.2, 0.3], 2).unwrap();
        assert_eq!(
            record,
            AssembledRecord::Gate {
                name: "U",
                params: vec![0.1, 0.2, 0.3],
                qudits: vec![2],
            }
        );
    }

    #[test]
    fn kronecker_offsets_each_child_by_cumulative_width() {
        let a = Arc::new(GateNode::SingleQubit);
        let b = Arc::new(GateNode::Cnot);
        let k = GateNode::kronecker(vec![a, b]).unwrap();
        let theta = [0.0, 0.0, 0.0];
        let record = assemble(&k, &theta, 0).unwrap();
        match record {
            AssembledRecord::Parallel(children) => {
                assert_eq!(children.len(), 2);
                match &children[0] {
                    AssembledRecord::Gate { qudits, .. } => assert_eq!(qudits, &vec![0]),
                    _ => panic!("expected leaf"),
                }
                match &children[1] {
                    AssembledRecord::Gate { qudits, .. } => assert_eq!(qudits, &vec![1, 2]),
                    _ => panic!("expected leaf"),
                }
            }
            _ => panic!("expected Parallel"),
        }
    }

    #[test]
    fn product_keeps_same_base_qudit_across_children() {
        let a = Arc::new(GateNode::SingleQubit);
        let b = Arc::new(GateNode::SingleQubit);
        let p = GateNode::product(vec![a, b]).unwrap();
        let theta = [0.0; 6];
        let record = assemble(&p, &theta, 5).unwrap();
        match record {
            AssembledRecord::Sequential(children) => {
                for child in children {
                    match child {
                        AssembledRecord::Gate { qudits, .. } => assert_eq!(qudits, vec![5]),
                        _ => panic!("expected leaf"),
                    }
                }
            }
            _ => panic!("expected Sequential"),
        }
    }
}
