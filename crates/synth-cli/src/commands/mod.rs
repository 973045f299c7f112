pub mod resume;
pub mod run;

use console::style;
use synth_ir::AssembledRecord;

/// Print an assembled circuit to stdout as an indented tree, the "output
/// assembly" piece §1 names as out of the core's scope.
pub fn print_circuit(record: &AssembledRecord, indent: usize) {
    let pad = "  ".repeat(indent);
    match record {
        AssembledRecord::Gate { name, params, qudits } => {
            let params_str = if params.is_empty() {
                String::new()
            } else {
                format!(
                    "({})",
                    params.iter().map(|p| format!("{p:.4}")).collect::<Vec<_>>().join(", ")
                )
            };
            println!(
                "{pad}{} {}{} on {:?}",
                style("gate").dim(),
                style(name).cyan().bold(),
                params_str,
                qudits
            );
        }
        AssembledRecord::Sequential(children) => {
            println!("{pad}{}", style("sequential:").dim());
            for child in children {
                print_circuit(child, indent + 1);
            }
        }
        AssembledRecord::Parallel(children) => {
            println!("{pad}{}", style("parallel:").dim());
            for child in children {
                print_circuit(child, indent + 1);
            }
        }
    }
}

/// Print a solved synthesis output: the assembled circuit plus θ and the
/// achieved residual/depth.
pub fn print_result(output: &synth_search::SynthesisOutput) -> anyhow::Result<()> {
    let record = synth_ir::assemble(&output.structure, &output.vector, 0)?;
    println!("{}", style("circuit:").green().bold());
    print_circuit(&record, 1);
    println!(
        "{} distance={:.6e} depth={}",
        style("result:").green().bold(),
        output.best_distance,
        output.best_depth
    );
    println!(
        "{} [{}]",
        style("theta:").dim(),
        output
            .vector
            .iter()
            .map(|v| format!("{v:.6}"))
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}
