//! List commands implementation

use crate::cli::KindFilter;
use flashsniff_core::{AddressModeSwitch, CommandInfo, CommandKind, CommandSet};

fn matches_filter(info: &CommandInfo, filter: Option<KindFilter>) -> bool {
    match filter {
        None => true,
        Some(KindFilter::Data) => info.kind == CommandKind::Data,
        Some(KindFilter::Control) => info.kind == CommandKind::Control,
        Some(KindFilter::Continuation) => info.is_continuation(),
    }
}

fn format_notes(info: &CommandInfo) -> String {
    let mut notes = Vec::new();
    if let Some(clocks) = info.dummy_clocks {
        notes.push(format!("quad, {} dummy clocks", clocks));
    }
    if info.header_adjust > 0 {
        notes.push(format!("+{} header", info.header_adjust));
    }
    match info.address_mode {
        Some(AddressModeSwitch::Enter4Byte) => notes.push("enters 4-byte mode".to_string()),
        Some(AddressModeSwitch::Exit4Byte) => notes.push("exits 4-byte mode".to_string()),
        None => {}
    }
    notes.join(", ")
}

/// List the opcodes of a command set
pub fn list_commands(commands: &CommandSet, filter: Option<KindFilter>) {
    println!("Known opcodes:");
    println!();
    println!("{:<6} {:<8} {:<32} Notes", "Opcode", "Kind", "Name");
    println!("{}", "-".repeat(72));

    let mut shown = 0;
    for info in commands.iter().filter(|info| matches_filter(info, filter)) {
        let kind = match info.kind {
            CommandKind::Data => "data",
            CommandKind::Control => "control",
        };
        println!(
            "0x{:02X}   {:<8} {:<32} {}",
            info.opcode,
            kind,
            info.name,
            format_notes(info)
        );
        shown += 1;
    }

    println!();
    println!("{} of {} opcodes shown", shown, commands.len());
}
