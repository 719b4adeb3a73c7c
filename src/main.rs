// ── comshim command line ──────────────────────────────────────────────────────
//
// Thin front end over the library:
//   • `create`  – enter an apartment, create one instance, report, release;
//   • `flags`   – list every COINIT / CLSCTX value;
//   • `hresult` – classify and name a result code.
// No `unsafe` here.

#![deny(unsafe_code)]

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use log::debug;

use comshim::{
    flags::{self, ClsCtx, CoInit},
    guid::{Guid, IID_IUNKNOWN},
    platform, profile, ComError, HResult, Result,
};

#[derive(Parser)]
#[command(name = "comshim", version, about = "Poke at the Windows COM activation entry points")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create one instance of a class and release it again.
    Create {
        /// Class id, e.g. {0002DF01-0000-0000-C000-000000000046}.
        clsid: Guid,
        /// Interface to request (default: IUnknown).
        #[arg(long)]
        iid: Option<Guid>,
        /// Activation context as flag text, e.g. "LOCAL_SERVER".
        #[arg(long)]
        context: Option<String>,
        /// Profile file (default: %APPDATA%\comshim\profile.json).
        #[arg(long)]
        profile: Option<PathBuf>,
    },
    /// List the COINIT and CLSCTX flag values.
    Flags,
    /// Classify a result code given in hex (0x...) or decimal.
    Hresult { code: String },
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("comshim: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Create {
            clsid,
            iid,
            context,
            profile: profile_path,
        } => {
            let mut prof = match profile_path {
                Some(path) => profile::load(&path)?,
                None => profile::load_default()?,
            };
            if let Some(text) = context {
                prof.context = parse_context(&text)?;
            }
            debug!("profile: {prof:?}");
            create(&clsid, &iid.unwrap_or(IID_IUNKNOWN), prof.concurrency, prof.context)
        }
        Command::Flags => {
            println!("COINIT");
            for (name, value) in flags::named_values::<CoInit>() {
                println!("  {name:<32} {value:#010x}");
            }
            println!("CLSCTX");
            for (name, value) in flags::named_values::<ClsCtx>() {
                println!("  {name:<32} {value:#010x}");
            }
            Ok(())
        }
        Command::Hresult { code } => {
            let hr = HResult::parse(&code).ok_or(ComError::InvalidHResult(code))?;
            print_hresult(hr);
            Ok(())
        }
    }
}

fn parse_context(text: &str) -> Result<ClsCtx> {
    // Reuse the serde flag-text parser so the CLI and profiles agree.
    Ok(serde_json::from_value(serde_json::Value::String(text.to_owned()))?)
}

fn print_hresult(hr: HResult) {
    let class = if hr.is_success() { "success" } else { "failure" };
    println!("{hr}: {class}, facility {}, code {:#06x}", hr.facility(), hr.code());
    if let Some(text) = platform::message(hr) {
        println!("  {text}");
    }
}

#[cfg(windows)]
fn create(clsid: &Guid, iid: &Guid, concurrency: CoInit, context: ClsCtx) -> Result<()> {
    use comshim::{activation, apartment::Apartment, TypeDesc};

    let rt = platform::Ole32;
    let _apt = Apartment::enter(&rt, concurrency)?;
    let requested = TypeDesc::interface("requested interface", *iid);
    let instance = activation::create_instance(&rt, clsid, None, context, &requested)?;
    println!(
        "{}: created {clsid} as {} at {:p}",
        instance.code(),
        instance.iid(),
        instance.as_raw().as_ptr()
    );
    Ok(())
}

#[cfg(not(windows))]
fn create(_clsid: &Guid, _iid: &Guid, _concurrency: CoInit, _context: ClsCtx) -> Result<()> {
    Err(ComError::Unsupported)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn context_text_uses_flag_names() {
        let ctx = parse_context("LOCAL_SERVER | ACTIVATE_64_BIT_SERVER").expect("parse");
        assert_eq!(ctx, ClsCtx::LOCAL_SERVER | ClsCtx::ACTIVATE_64_BIT_SERVER);
        assert_eq!(ctx.bits(), 0x80004);
    }

    #[test]
    fn unknown_context_name_is_rejected() {
        assert!(matches!(parse_context("WARP_DRIVE"), Err(ComError::Json(_))));
    }

    #[test]
    fn hresult_command_rejects_bad_code() {
        let err = run(Cli::parse_from(["comshim", "hresult", "zz"])).expect_err("zz");
        assert!(matches!(err, ComError::InvalidHResult(ref text) if text == "zz"));
    }

    #[test]
    fn hresult_command_accepts_hex() {
        run(Cli::parse_from(["comshim", "hresult", "0x80070057"])).expect("E_INVALIDARG");
    }

    #[test]
    fn flags_command_lists_both_sets() {
        run(Cli::parse_from(["comshim", "flags"])).expect("flags");
        assert!(flags::named_values::<CoInit>().any(|(name, _)| name == "MULTITHREADED"));
        assert!(flags::named_values::<ClsCtx>().any(|(name, _)| name == "PS_DLL"));
    }

    #[test]
    fn create_rejects_malformed_clsid() {
        assert!(Cli::try_parse_from(["comshim", "create", "not-a-guid"]).is_err());
    }

    #[test]
    fn create_reports_bad_profile_before_activation() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("profile.json");
        std::fs::write(&path, r#"{"version":7}"#).expect("write");
        let err = run(Cli::parse_from([
            "comshim",
            "create",
            "{6B29FC40-CA47-1067-B31D-00DD010662DA}",
            "--profile",
            path.to_str().expect("utf-8 temp path"),
        ]))
        .expect_err("version 7");
        assert!(matches!(err, ComError::ProfileVersion(7)));
    }

    #[cfg(not(windows))]
    #[test]
    fn create_is_unsupported_off_windows() {
        let err = create(&IID_IUNKNOWN, &IID_IUNKNOWN, CoInit::MULTITHREADED, ClsCtx::ALL)
            .expect_err("no native runtime");
        assert!(matches!(err, ComError::Unsupported));
    }

    #[cfg(not(windows))]
    #[test]
    fn create_command_reaches_activation_with_profile() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("profile.json");
        profile::save(&path, &profile::Profile::default()).expect("save");
        let err = run(Cli::parse_from([
            "comshim",
            "create",
            "{6B29FC40-CA47-1067-B31D-00DD010662DA}",
            "--context",
            "LOCAL_SERVER",
            "--profile",
            path.to_str().expect("utf-8 temp path"),
        ]))
        .expect_err("no native runtime");
        assert!(matches!(err, ComError::Unsupported));
    }
}
