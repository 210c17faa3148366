//! Build script for mite-firmware
//!
//! - Sets up linker search paths and scripts
//! - Validates core.toml and turns it into a `CoreSettings` constant

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use mite_core::config::{
    BaseSet, CoreSettings, CpuFrequency, FormatSettings, FormatterMode, IntWidth, PwmSettings,
};
use mite_hal::{Prescaler, Waveform};

fn main() {
    setup_linker();
    generate_settings();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate core.toml and write `core_settings.rs` to OUT_DIR
fn generate_settings() {
    println!("cargo:rerun-if-changed=core.toml");

    let config_path = Path::new("core.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: core.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a core.toml configuration file.           ║\n\
            ║  Please create one in the mite-firmware directory.               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read core.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in core.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    let core = parse_core(&config, &mut errors);

    if !errors.is_empty() {
        let error_list = errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n");
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: core.toml validation failed                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            error_list
        );
    }

    let Some((settings, pin)) = core else {
        unreachable!("no settings without errors");
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("core_settings.rs"), render(&settings, pin)).unwrap();

    println!(
        "cargo:warning=core.toml validated: {:?} at {} baud on gpio{}",
        settings.cpu,
        settings.baud_rate(),
        pin
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = match line.char_indices().nth(61) {
                Some((cut, _)) if line.chars().count() > 64 => format!("{}...", &line[..cut]),
                _ => line.to_string(),
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::Value> {
    config.get(name)
}

fn get_bool(config: &toml::Value, table: &str, key: &str, default: bool, errors: &mut Vec<String>) -> bool {
    match section(config, table).and_then(|t| t.get(key)) {
        None => default,
        Some(v) => v.as_bool().unwrap_or_else(|| {
            errors.push(format!("{}.{} must be true or false", table, key));
            default
        }),
    }
}

fn get_int(config: &toml::Value, table: &str, key: &str, errors: &mut Vec<String>) -> Option<i64> {
    let value = section(config, table).and_then(|t| t.get(key))?;
    match value.as_integer() {
        Some(n) => Some(n),
        None => {
            errors.push(format!("{}.{} must be an integer", table, key));
            None
        }
    }
}

fn get_str<'a>(config: &'a toml::Value, table: &str, key: &str, errors: &mut Vec<String>) -> Option<&'a str> {
    let value = section(config, table).and_then(|t| t.get(key))?;
    match value.as_str() {
        Some(s) => Some(s),
        None => {
            errors.push(format!("{}.{} must be a string", table, key));
            None
        }
    }
}

/// Parse a pin string: "gpio0" .. "gpio29"
fn parse_pin_string(s: &str) -> Option<u8> {
    let pin: u8 = s.trim().strip_prefix("gpio")?.parse().ok()?;
    (pin < 30).then_some(pin)
}

/// Build the settings, collecting every problem instead of stopping at the first
fn parse_core(config: &toml::Value, errors: &mut Vec<String>) -> Option<(CoreSettings, u8)> {
    let cpu = match get_int(config, "cpu", "frequency", errors) {
        None => {
            errors.push("cpu.frequency is required".to_string());
            None
        }
        Some(hz) => match u32::try_from(hz).map_err(|_| ()).and_then(|hz| CpuFrequency::from_hz(hz).map_err(|_| ())) {
            Ok(cpu) => Some(cpu),
            Err(()) => {
                errors.push(format!("cpu.frequency: {} Hz is not a calibrated clock", hz));
                None
            }
        },
    };

    let pin = match get_str(config, "serial", "pin", errors) {
        None => 0,
        Some(s) => parse_pin_string(s).unwrap_or_else(|| {
            errors.push(format!("serial.pin: '{}' is not gpio0..gpio29", s));
            0
        }),
    };

    let baud = get_int(config, "serial", "baud", errors).and_then(|b| match u32::try_from(b) {
        Ok(b) => Some(b),
        Err(_) => {
            errors.push(format!("serial.baud: {} is out of range", b));
            None
        }
    });

    let width = match get_str(config, "print", "width", errors) {
        None | Some("long") => IntWidth::Long,
        Some("int") => IntWidth::Int,
        Some("byte") => IntWidth::Byte,
        Some(other) => {
            errors.push(format!("print.width: '{}' is not byte, int or long", other));
            IntWidth::Long
        }
    };

    let mode = match get_str(config, "print", "mode", errors) {
        None | Some("table") => FormatterMode::Table(parse_bases(config, errors)),
        Some("division") => FormatterMode::Division,
        Some(other) => {
            errors.push(format!("print.mode: '{}' is not table or division", other));
            FormatterMode::default()
        }
    };

    let pwm = if section(config, "pwm").is_some() {
        let prescaler = get_int(config, "pwm", "prescaler", errors).and_then(|d| {
            let found = u32::try_from(d).ok().and_then(Prescaler::from_divisor);
            if found.is_none() {
                errors.push(format!("pwm.prescaler: {} is not 1, 8, 64, 256 or 1024", d));
            }
            found
        });
        let waveform = get_str(config, "pwm", "waveform", errors).and_then(|w| {
            let found = match w {
                "normal" => Some(Waveform::Normal),
                "phase-correct" => Some(Waveform::PhaseCorrect),
                "ctc" => Some(Waveform::Ctc),
                "fast" => Some(Waveform::Fast),
                _ => None,
            };
            if found.is_none() {
                errors.push(format!("pwm.waveform: '{}' is not normal, phase-correct, ctc or fast", w));
            }
            found
        });
        Some(PwmSettings::new(prescaler, waveform))
    } else {
        None
    };

    let cpu = cpu?;
    let settings = CoreSettings::new(cpu)
        .with_format(FormatSettings::new(width, mode))
        .with_read(get_bool(config, "serial", "read", true, errors))
        .with_millis(get_bool(config, "timers", "millis", true, errors))
        .with_micros(get_bool(config, "timers", "micros", false, errors))
        .with_pwm(pwm)
        .with_adc(get_bool(config, "adc", "enabled", true, errors))
        .with_baud(baud);

    if let Err(e) = settings.line_timing() {
        errors.push(format!("serial: {}", e));
    }

    Some((settings, pin))
}

fn parse_bases(config: &toml::Value, errors: &mut Vec<String>) -> BaseSet {
    let Some(value) = section(config, "print").and_then(|t| t.get("bases")) else {
        return BaseSet::ALL;
    };
    let Some(list) = value.as_array() else {
        errors.push("print.bases must be a list".to_string());
        return BaseSet::ALL;
    };

    let mut bases = BaseSet::empty();
    for entry in list {
        bases = match entry.as_str() {
            Some("bin") => bases.with(BaseSet::BIN),
            Some("oct") => bases.with(BaseSet::OCT),
            Some("dec") => bases.with(BaseSet::DEC),
            Some("hex") => bases.with(BaseSet::HEX),
            _ => {
                errors.push(format!("print.bases: {} is not bin, oct, dec or hex", entry));
                bases
            }
        };
    }
    bases
}

/// Rust source for the validated settings
fn render(settings: &CoreSettings, pin: u8) -> String {
    let mode = match settings.format.mode {
        FormatterMode::Division => "FormatterMode::Division".to_string(),
        FormatterMode::Table(bases) => {
            let mut expr = "BaseSet::empty()".to_string();
            for (radix, name) in [(2, "BIN"), (8, "OCT"), (10, "DEC"), (16, "HEX")] {
                if bases.contains(radix) {
                    expr.push_str(&format!(".with(BaseSet::{})", name));
                }
            }
            format!("FormatterMode::Table({})", expr)
        }
    };

    let pwm = match settings.pwm {
        None => "None".to_string(),
        Some(pwm) => format!(
            "Some(PwmSettings::new({}, {}))",
            option_path("Prescaler", pwm.prescaler),
            option_path("Waveform", pwm.waveform)
        ),
    };

    let baud = match settings.baud {
        None => "None".to_string(),
        Some(baud) => format!("Some({})", baud),
    };

    format!(
        "// Generated from core.toml by build.rs\n\
         \n\
         pub const CORE_SETTINGS: CoreSettings = CoreSettings::new(CpuFrequency::{cpu:?})\n    \
             .with_format(FormatSettings::new(IntWidth::{width:?}, {mode}))\n    \
             .with_read({read})\n    \
             .with_millis({millis})\n    \
             .with_micros({micros})\n    \
             .with_pwm({pwm})\n    \
             .with_adc({adc})\n    \
             .with_baud({baud});\n\
         \n\
         /// Take the serial line pin from the peripherals\n\
         macro_rules! line_pin {{\n    \
             ($p:expr) => {{\n        \
                 $p.PIN_{pin}\n    \
             }};\n\
         }}\n",
        cpu = settings.cpu,
        width = settings.format.width,
        mode = mode,
        read = settings.read_enabled,
        millis = settings.millis,
        micros = settings.micros,
        pwm = pwm,
        adc = settings.adc,
        baud = baud,
        pin = pin,
    )
}

fn option_path<T: std::fmt::Debug>(ty: &str, value: Option<T>) -> String {
    match value {
        None => "None".to_string(),
        Some(v) => format!("Some({}::{:?})", ty, v),
    }
}
