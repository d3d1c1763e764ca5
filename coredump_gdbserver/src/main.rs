use std::io;
use std::net::TcpListener;
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn, LevelFilter};
use num_traits::ToPrimitive;

use coredump_gdbstub::arch::arm::reg::id::CortexMRegId;
use coredump_gdbstub::arch::arm::ArmCortexM;
use coredump_gdbstub::arch::riscv::reg::id::RiscvRegId;
use coredump_gdbstub::arch::riscv::Riscv32;
use coredump_gdbstub::arch::Arch;
use coredump_gdbstub::conn::{ConnectionExt, PipeConnection};
use coredump_gdbstub::coredump::zephyr::{TargetCode, ZephyrCoreDump};
use coredump_gdbstub::coredump::CoreDump;
use coredump_gdbstub::stub::GdbStub;
use coredump_gdbstub::Session;

mod elf;

pub type DynResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Serve a Zephyr coredump to GDB, as if it were a halted target.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Firmware image the coredump was taken from
    elffile: PathBuf,

    /// Coredump log (binary, or a serial console capture with `#CD:` lines)
    logfile: PathBuf,

    /// TCP port to listen on (127.0.0.1 only)
    #[arg(long, default_value_t = 1234)]
    port: u16,

    /// Talk to GDB over stdin/stdout instead (`target remote | ...`)
    #[arg(long)]
    pipe: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn wait_for_tcp(port: u16) -> DynResult<Box<dyn ConnectionExt<Error = io::Error>>> {
    let sockaddr = format!("127.0.0.1:{}", port);
    info!("Waiting for a GDB connection on {:?}...", sockaddr);

    let sock = TcpListener::bind(sockaddr)?;
    let (stream, addr) = sock.accept()?;
    info!("Debugger connected from {}", addr);

    Ok(Box::new(stream))
}

fn serve<A: Arch>(
    cli: &Cli,
    dump: &ZephyrCoreDump,
    firmware: &elf::Firmware<'_>,
    pc: A::RegId,
) -> DynResult<()> {
    let session = Session::<A, _>::new(dump);

    match session.registers().get(pc).and_then(|pc| pc.to_u64()) {
        Some(pc) => info!(
            "Faulting PC: {:#010x} ({})",
            pc,
            firmware.symbolize(pc).unwrap_or("??")
        ),
        None => warn!("Coredump does not contain the PC"),
    }

    let conn: Box<dyn ConnectionExt<Error = io::Error>> = if cli.pipe {
        info!("Talking to GDB over stdin/stdout");
        Box::new(PipeConnection::new())
    } else {
        wait_for_tcp(cli.port)?
    };

    let reason = GdbStub::new(conn, session).run_blocking()?;
    info!("Session ended: {:?}", reason);

    Ok(())
}

fn main() -> DynResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let log = std::fs::read(&cli.logfile)?;
    let mut dump = ZephyrCoreDump::from_bytes(&log)?;

    let header = *dump.header();
    info!("Target: {}", header.target);
    info!("Reason: {}", header.reason);
    info!("Pointer size: {} bits", header.pointer_bits);
    info!(
        "Memory regions: {} (+{} thread metadata blocks skipped)",
        dump.memory_regions().len(),
        dump.thread_meta_blocks()
    );

    let elf_data = std::fs::read(&cli.elffile)?;
    let firmware = elf::Firmware::parse(&elf_data)?;
    let readonly = firmware.readonly_regions();
    info!("Serving {} read-only sections from {:?}", readonly.len(), cli.elffile);
    for region in readonly {
        dump.push_region(region);
    }

    match header.target {
        TargetCode::ArmCortexM => serve::<ArmCortexM>(&cli, &dump, &firmware, CortexMRegId::Pc),
        TargetCode::Riscv => serve::<Riscv32>(&cli, &dump, &firmware, RiscvRegId::Pc),
        other => Err(format!("unsupported target: {}", other).into()),
    }
}
