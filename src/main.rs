use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

use mvecore::cpu::mve::table;
use mvecore::cpu::sysreg::{FPSCR_C, FPSCR_N, FPSCR_QC, FPSCR_V, FPSCR_Z};
use mvecore::vm::{ExecRequest, Vm, VmConfig};

#[derive(Parser)]
#[command(
    name = "mvecore",
    version,
    about = "Armv8.1-M MVE datapath: run one predicated vector operation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one operation with Qd=Q0, Qn=Q1, Qm=Q2
    Exec {
        /// Operation mnemonic (see `mvecore list`)
        op: String,

        /// Initial destination register (hex, 128-bit)
        #[arg(long, default_value = "0", value_parser = parse_u128)]
        qd: u128,

        /// First source register (hex, 128-bit)
        #[arg(long, default_value = "0", value_parser = parse_u128)]
        qn: u128,

        /// Second source register (hex, 128-bit)
        #[arg(long, default_value = "0", value_parser = parse_u128)]
        qm: u128,

        /// Scalar operand (Rm/Rt/Rda, hex)
        #[arg(long, default_value = "0", value_parser = parse_u32)]
        scalar: u32,

        /// 64-bit accumulator seed for reductions (hex)
        #[arg(long, default_value = "0", value_parser = parse_u64)]
        acc: u64,

        /// Base address for loads and stores (hex, default: start of SRAM)
        #[arg(long, value_parser = parse_u32)]
        addr: Option<u32>,

        /// VPR value (hex)
        #[arg(long, default_value = "0", value_parser = parse_u32)]
        vpr: u32,

        /// Tail-predication element size (0-3 enables, 4 disables)
        #[arg(long)]
        ltpsize: Option<u32>,

        /// Loop counter (LR, decimal)
        #[arg(long, default_value = "0")]
        lr: u32,

        /// ECI beat state (decimal: 0, 1, 2, 4 or 5)
        #[arg(long, default_value = "0")]
        eci: u32,

        /// Initial FPSCR (hex)
        #[arg(long, default_value = "0", value_parser = parse_u32)]
        fpscr: u32,

        /// Bytes to place at the load/store address (hex string)
        #[arg(long)]
        mem: Option<String>,

        /// SRAM size in KiB
        #[arg(long, default_value = "64")]
        sram_kib: u32,

        /// Print the operation and predication state before it runs
        #[arg(long)]
        trace: bool,
    },
    /// List every operation mnemonic
    List,
}

fn strip_hex(s: &str) -> &str {
    s.trim_start_matches("0x").trim_start_matches("0X")
}

fn parse_u128(s: &str) -> Result<u128, String> {
    u128::from_str_radix(&strip_hex(s).replace('_', ""), 16).map_err(|e| e.to_string())
}

fn parse_u64(s: &str) -> Result<u64, String> {
    u64::from_str_radix(&strip_hex(s).replace('_', ""), 16).map_err(|e| e.to_string())
}

fn parse_u32(s: &str) -> Result<u32, String> {
    u32::from_str_radix(&strip_hex(s).replace('_', ""), 16).map_err(|e| e.to_string())
}

fn parse_bytes(s: &str) -> Result<Vec<u8>, String> {
    let hex: String = strip_hex(s).chars().filter(|c| !c.is_whitespace() && *c != '_').collect();
    if hex.len() % 2 != 0 {
        return Err("odd number of hex digits".to_string());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string()))
        .collect()
}

fn sram_bytes(kib: u32) -> Option<u32> {
    kib.checked_mul(1024).filter(|&n| n != 0)
}

fn flags(fpscr: u32) -> String {
    [
        (FPSCR_N, 'N'),
        (FPSCR_Z, 'Z'),
        (FPSCR_C, 'C'),
        (FPSCR_V, 'V'),
        (FPSCR_QC, 'Q'),
    ]
    .iter()
    .map(|&(bit, c)| if fpscr & bit != 0 { c } else { '-' })
    .collect()
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Exec {
            op,
            qd,
            qn,
            qm,
            scalar,
            acc,
            addr,
            vpr,
            ltpsize,
            lr,
            eci,
            fpscr,
            mem,
            sram_kib,
            trace,
        } => {
            let mem = match mem.as_deref().map(parse_bytes).transpose() {
                Ok(m) => m.unwrap_or_default(),
                Err(e) => {
                    eprintln!("error: invalid --mem: {}", e);
                    std::process::exit(2);
                }
            };
            let Some(sram_size) = sram_bytes(sram_kib) else {
                Cli::command()
                    .error(
                        ErrorKind::ValueValidation,
                        format!("--sram-kib {} is out of range", sram_kib),
                    )
                    .exit();
            };
            let config = VmConfig {
                sram_size,
                trace,
                ..VmConfig::default()
            };
            let req = ExecRequest {
                qd,
                qn,
                qm,
                scalar,
                acc,
                addr,
                vpr,
                ltpsize,
                lr,
                eci,
                fpscr,
                mem,
            };

            let mut vm = Vm::new(config);
            match vm.exec(&op, &req) {
                Ok(out) => {
                    println!("Q0     = {:#034x}", out.qd);
                    if let Some(s) = out.scalar {
                        println!("result = {:#018x}", s);
                    }
                    println!("FPSCR  = {:#010x} [{}]", out.fpscr, flags(out.fpscr));
                    println!("VPR    = {:#010x}", out.vpr);
                    if !req.mem.is_empty() || addr.is_some() {
                        let bytes: Vec<String> =
                            out.mem.iter().map(|b| format!("{:02x}", b)).collect();
                        println!("mem    = {}", bytes.join(" "));
                    }
                }
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::List => {
            for name in table::names() {
                println!("{}", name);
            }
        }
    }
}
