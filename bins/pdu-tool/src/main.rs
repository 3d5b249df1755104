use clap::Parser;

use lte_core::BitReader;
use lte_pdus::mac::enums::MacChanType;
use lte_pdus::mac::pdus::{MacPdu, RarPdu};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "LTE MAC PDU decoder",
    long_about = "Decodes a hex-encoded MAC PDU for the specified transport channel"
)]
struct Args {
    /// Transport channel the PDU was carried on
    #[arg(help = "Channel: [ dlsch | ulsch | mch | rar ]")]
    channel: String,

    /// Raw PDU to decode
    #[arg(help = "Hex string (whitespace allowed) to parse as PDU")]
    hex: String,

    #[arg(
        long = "simultaneous-pucch-pusch",
        help = "Assume the UE is configured for simultaneous PUCCH/PUSCH when decoding an extended power headroom CE"
    )]
    simultaneous_pucch_pusch: bool,
}

fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.len() % 2 != 0 {
        return Err("hex string must contain an even number of digits".to_string());
    }
    (0..cleaned.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&cleaned[i..i + 2], 16).map_err(|e| e.to_string()))
        .collect()
}

fn main() {
    eprintln!("[+] LTE MAC PDU decoding tool");

    let args = Args::parse();

    let bytes = match parse_hex(&args.hex) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: invalid hex input: {}", e);
            std::process::exit(1);
        }
    };
    let mut buf = BitReader::new(&bytes);

    match args.channel.to_lowercase().as_str() {
        "rar" => match RarPdu::from_bitbuf(&mut buf) {
            Ok(pdu) => println!("{:#?}", pdu),
            Err(e) => {
                eprintln!("Error: failed to decode RAR PDU: {:?}", e);
                std::process::exit(1);
            }
        },
        chan @ ("dlsch" | "ulsch" | "mch") => {
            let chan_type = match chan {
                "dlsch" => MacChanType::Dlsch,
                "ulsch" => MacChanType::Ulsch,
                _ => MacChanType::Mch,
            };
            match MacPdu::from_bitbuf(chan_type, &mut buf, args.simultaneous_pucch_pusch) {
                Ok(pdu) => {
                    println!("{}", pdu);
                    println!("{:#?}", pdu);
                }
                Err(e) => {
                    eprintln!("Error: failed to decode {} PDU: {:?}", chan_type, e);
                    std::process::exit(1);
                }
            }
        }
        other => {
            eprintln!("Error: Unsupported channel '{}'. Use: dlsch, ulsch, mch, rar", other);
            std::process::exit(1);
        }
    }

    if buf.bits_remaining() > 0 {
        eprintln!("[!] {} trailing bits left undecoded", buf.bits_remaining());
    }
}
