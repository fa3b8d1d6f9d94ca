//! Ternuino - CLI Entry Point
//!
//! Commands:
//! - `ternuino run <circuit>` - Step a circuit and report its probes
//! - `ternuino check <circuit>` - Load a circuit and audit its wiring
//! - `ternuino levels <circuit>` - Show the signal-depth layout
//! - `ternuino export <circuit>` - Re-save a circuit in canonical form
//! - `ternuino bench <circuit>` - Interactive terminal bench
//! - `ternuino demo` - Run the reference circuit
//! - `ternuino test` - Built-in self-test

use clap::{ArgAction, Parser, Subcommand};
use ternuino::{Circuit, Component, ComponentType, load_circuit};

#[derive(Parser)]
#[command(name = "ternuino")]
#[command(version = "0.1.0")]
#[command(about = "A balanced ternary logic circuit simulator")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); overrides RUST_LOG
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Step a circuit and print its probe readings
    Run {
        /// Path to the JSON circuit description
        circuit: String,
        /// Number of steps to perform
        #[arg(short = 'n', long, default_value = "1")]
        steps: u64,
        /// Set a switch before stepping, as ID=VALUE (repeatable)
        #[arg(short, long = "set", value_name = "ID=VALUE")]
        set: Vec<String>,
        /// Print probe readings after every step
        #[arg(short, long)]
        trace: bool,
    },
    /// Load a circuit and list unwired ports
    Check {
        /// Path to the JSON circuit description
        circuit: String,
    },
    /// Print the signal-depth layout of a circuit
    Levels {
        /// Path to the JSON circuit description
        circuit: String,
    },
    /// Load a circuit and write it back in canonical form
    Export {
        /// Path to the JSON circuit description
        circuit: String,
        /// Output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Interactive terminal bench
    Bench {
        /// Path to the JSON circuit description
        circuit: String,
    },
    /// Build and run the reference circuit
    Demo,
    /// Run the built-in self-test
    Test,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Run { circuit, steps, set, trace }) => {
            run_circuit(&circuit, steps, &set, trace);
        }
        Some(Commands::Check { circuit }) => {
            check_circuit(&circuit);
        }
        Some(Commands::Levels { circuit }) => {
            print_levels(&circuit);
        }
        Some(Commands::Export { circuit, output }) => {
            export_circuit(&circuit, output);
        }
        Some(Commands::Bench { circuit }) => {
            bench_circuit(&circuit);
        }
        Some(Commands::Demo) => {
            run_demo();
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("Ternuino v0.1.0");
            println!("A balanced ternary logic circuit simulator");
            println!();
            println!("Use --help for available commands");
            println!();
            run_demo();
        }
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_or_exit(path: &str) -> Circuit {
    match load_circuit(path) {
        Ok(c) => {
            tracing::info!(path, components = c.len(), wires = c.wires().len(), "loaded circuit");
            c
        }
        Err(e) => {
            eprintln!("❌ Failed to load {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn parse_assignment(text: &str) -> Option<(&str, i64)> {
    let (id, value) = text.split_once('=')?;
    Some((id.trim(), value.trim().parse().ok()?))
}

fn probe_line(circuit: &Circuit) -> String {
    circuit
        .probes()
        .iter()
        .map(|(id, v)| format!("{}={}", id, v))
        .collect::<Vec<_>>()
        .join("  ")
}

fn run_circuit(path: &str, steps: u64, assignments: &[String], trace: bool) {
    println!("🔧 Running: {}", path);
    let mut circuit = load_or_exit(path);

    for text in assignments {
        let Some((id, value)) = parse_assignment(text) else {
            eprintln!("❌ Invalid switch assignment '{}', expected ID=VALUE", text);
            std::process::exit(1);
        };
        match circuit.set_switch_value(id, value) {
            Ok(v) => println!("🔀 {} = {}", id, v),
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        }
    }

    println!();
    println!("━━━ Simulation ━━━");

    for _ in 0..steps {
        if let Err(e) = circuit.step() {
            eprintln!("❌ Step {} failed: {}", circuit.steps() + 1, e);
            std::process::exit(1);
        }
        if trace {
            println!("{:>4}: {}", circuit.steps(), probe_line(&circuit));
        }
    }

    println!();
    println!("━━━ Result ━━━");
    println!("Steps: {}", circuit.steps());
    for component in circuit.components() {
        if let Some(v) = component.switch_value() {
            println!("Switch {:<10} {}", component.id(), v);
        }
    }
    for (id, v) in circuit.probes() {
        println!("Probe  {:<10} {} ({})", id, v, v.to_i8());
    }
}

fn check_circuit(path: &str) {
    use ternuino::layout::unwired_ports;

    println!("🔍 Checking: {}", path);
    let circuit = load_or_exit(path);
    println!("✓ {} components, {} wires", circuit.len(), circuit.wires().len());

    let issues = unwired_ports(&circuit);
    if issues.is_empty() {
        println!("✓ All ports wired");
        return;
    }

    println!();
    println!("⚠️  Unwired ports:");
    for (id, ports) in &issues {
        println!("  {:<10} {}", id, ports.join(", "));
    }
}

fn print_levels(path: &str) {
    use ternuino::layout::levels;

    let circuit = load_or_exit(path);
    for (level, ids) in levels(&circuit) {
        println!("{:>3}: {}", level, ids.join(" "));
    }
}

fn export_circuit(path: &str, output: Option<String>) {
    use ternuino::{dump_circuit_to_json, save_circuit};

    let circuit = load_or_exit(path);
    match output {
        Some(out) => {
            if let Err(e) = save_circuit(&out, &circuit) {
                eprintln!("❌ Failed to save: {}", e);
                std::process::exit(1);
            }
            println!("✓ Saved to {}", out);
        }
        None => match dump_circuit_to_json(&circuit) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to export: {}", e);
                std::process::exit(1);
            }
        },
    }
}

#[cfg(feature = "tui")]
fn bench_circuit(path: &str) {
    use ternuino::run_bench;

    let circuit = load_or_exit(path);
    println!("🚀 Launching bench...");

    if let Err(e) = run_bench(circuit) {
        eprintln!("❌ Bench error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn bench_circuit(_path: &str) {
    eprintln!("❌ This build has no terminal bench (enable the `tui` feature)");
    std::process::exit(1);
}

/// Two switches feeding AND, a transistor and NOR into a latch and probe.
fn reference_circuit() -> Result<Circuit, ternuino::CircuitError> {
    let mut c = Circuit::new();
    c.add_component(Component::with_value("sw1", ComponentType::SwitchTernary, Some(1)))?;
    c.add_component(Component::with_value("sw2", ComponentType::SwitchTernary, Some(-1)))?;
    for (id, ty) in [
        ("and1", ComponentType::Tand),
        ("nor1", ComponentType::Tnor),
        ("t1", ComponentType::Transistor),
        ("l1", ComponentType::TLatch),
        ("p1", ComponentType::Probe),
    ] {
        c.add_component(Component::new(id, ty))?;
    }

    c.connect("sw1", "out", "and1", "in1")?;
    c.connect("sw2", "out", "and1", "in2")?;
    c.connect("and1", "out", "t1", "presence")?;
    c.connect("sw1", "out", "t1", "sign")?;
    c.connect("t1", "out", "nor1", "in1")?;
    c.connect("sw2", "out", "nor1", "in2")?;
    c.connect("nor1", "out", "l1", "in")?;
    c.connect("sw1", "out", "l1", "enable")?;
    c.connect("l1", "out", "p1", "in")?;
    Ok(c)
}

fn run_demo() {
    println!("━━━ Reference Circuit ━━━");
    println!();

    let result = reference_circuit().and_then(|mut c| {
        c.step()?;
        println!("Probe after step 1: {}", c.read_probe("p1")?);

        c.toggle_switch("sw1")?;
        c.toggle_switch("sw2")?;
        c.step()?;
        println!("Probe after step 2: {}", c.read_probe("p1")?);
        Ok(())
    });

    if let Err(e) = result {
        eprintln!("❌ Demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run_self_test() {
    use ternuino::{Trit, clamp};
    use ternuino::circuit::resolve;

    println!("━━━ Ternuino Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    // Test 1: Saturation
    print!("Clamp saturates into {{-1, 0, 1}}... ");
    let ok = (-10i64..=10).all(|v| clamp(v).to_i8() as i64 == v.signum());
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 2: Conflict rule
    print!("Multi-driver conflict rule... ");
    let ok = resolve([Trit::P, Trit::N]) == Trit::O
        && resolve([Trit::P, Trit::P, Trit::O]) == Trit::P
        && resolve([Trit::N, Trit::O]) == Trit::N
        && resolve(Vec::new()) == Trit::O;
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 3: Full adder identity
    print!("Full adder a + b + c = so + 3·co... ");
    let mut ok = true;
    for a in Trit::ALL {
        for b in Trit::ALL {
            for c in Trit::ALL {
                let (so, co) = a.full_add(b, c);
                if so.to_i8() + 3 * co.to_i8() != a.to_i8() + b.to_i8() + c.to_i8() {
                    ok = false;
                }
            }
        }
    }
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 4: Ternary switch cycle
    print!("Ternary switch cycles -1 → 0 → 1 → -1... ");
    let mut sw = Component::with_value("sw", ComponentType::SwitchTernary, Some(-1));
    let cycle: Vec<_> = (0..3).filter_map(|_| sw.toggle().ok()).collect();
    if cycle == [Trit::O, Trit::P, Trit::N] {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {:?})", cycle);
        failed += 1;
    }

    // Test 5: One hop per step
    print!("One hop per step... ");
    let mut c = Circuit::new();
    let built = c.add_component(Component::with_value("sw", ComponentType::SwitchTernary, Some(1)))
        .and_then(|_| c.add_component(Component::new("n", ComponentType::Tnot)))
        .and_then(|_| c.add_component(Component::new("p", ComponentType::Probe)))
        .and_then(|_| c.connect("sw", "out", "n", "in"))
        .and_then(|_| c.connect("n", "out", "p", "in"));
    let mut readings = Vec::new();
    if built.is_ok() {
        for _ in 0..2 {
            if c.step().is_ok() {
                readings.extend(c.read_probe("p").ok());
            }
        }
    }
    if readings == [Trit::O, Trit::N] {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {:?})", readings);
        failed += 1;
    }

    // Test 6: Reference circuit
    print!("Reference circuit probe stays 0... ");
    let result = reference_circuit().and_then(|mut c| {
        c.step()?;
        let first = c.read_probe("p1")?;
        c.toggle_switch("sw1")?;
        c.toggle_switch("sw2")?;
        c.step()?;
        Ok((first, c.read_probe("p1")?))
    });
    if result == Ok((Trit::O, Trit::O)) {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {:?})", result);
        failed += 1;
    }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
