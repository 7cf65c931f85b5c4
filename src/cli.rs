// File: src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "Tickli v{} - Fast and simple to-do list for the terminal (TUI)",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]            Start the interactive TUI", binary_name);
    println!("    {} export [--root <path>]     Print stored tasks as JSON to stdout", binary_name);
    println!("    {} --help                     Show this help message", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EXPORT COMMAND:");
    println!("    {} export                 Print the task list", binary_name);
    println!("    {} export > backup.json   Save tasks to a file", binary_name);
    println!();
    println!("KEYBINDINGS:");
    println!("    a:Add  e:Edit  d:Delete  Space/Enter:Toggle Done  m:Move  /:Search");
    println!("    f:Cycle Filter  C:Clear Done  D:Clear All  t:Theme  ?:Help  q:Quit");
    println!();
    println!("    While adding, Tab cycles the priority (low / medium / high).");
    println!("    While moving, j/k relocate the task; Enter or Esc drops it.");
}
