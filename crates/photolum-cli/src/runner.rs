//! Simulation runner: ties together materials, backend, and sweep, and
//! writes the results.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use photolum_compute::{ComputeBackend, CpuBackend, SerialBackend};
use photolum_core::bandgap::BandgapModel;
use photolum_core::sweep::TemperatureSweep;
use photolum_core::types::{BandgapGuard, MaterialParams, Spectrum};
use photolum_materials::provider::MaterialProvider;
use photolum_materials::VarshniMaterial;

use crate::config::{BackendChoice, JobConfig};

/// Results from a sweep run.
pub struct SimulationOutput {
    pub material: String,
    pub params: MaterialParams,
    pub spectra: Vec<Spectrum>,
}

/// Run a full temperature sweep from a parsed job configuration.
pub fn run_simulation(job: &JobConfig) -> Result<SimulationOutput> {
    let (material, params) = job.material.resolve()?;
    let config = job.simulation.to_simulation_config();
    config.validate()?;

    println!(
        "Material: {} (Eg0={} eV, alpha={:.4e} eV/K, beta={} K)",
        material, params.eg0, params.alpha, params.beta
    );
    println!(
        "Sweep: {} K -> {} K in {} steps, {} samples over Eg ± {} eV",
        config.t_min, config.t_max, config.steps, config.window.resolution, config.window.half_width
    );

    let backend = create_backend(job.simulation.backend_choice()?)?;
    println!("Backend: {}", backend.device_info().name);

    let spectra = TemperatureSweep::new(backend)
        .run(&params, &config)
        .with_context(|| format!("Sweep failed for material '{}'", material))?;

    for (i, s) in spectra.iter().enumerate() {
        if (i + 1) % 10 == 0 || i == 0 || i == spectra.len() - 1 {
            let peak = s.peak().map(|(e, _)| e).unwrap_or(f64::NAN);
            println!(
                "  [{}/{}] T={:.1} K: Eg={:.4} eV, peak at {:.4} eV",
                i + 1,
                spectra.len(),
                s.temperature,
                s.eg,
                peak
            );
        }
        if !s.eg.is_finite() {
            log::warn!(
                "Non-finite bandgap at T={} K; set strict_bandgap = true to reject it",
                s.temperature
            );
        }
    }

    Ok(SimulationOutput {
        material,
        params,
        spectra,
    })
}

/// Create the compute backend a job asked for.
///
/// - `Serial` (default): evaluate on the calling thread.
/// - `Cpu`: Rayon, on the global pool or a dedicated pool of `threads` workers.
fn create_backend(choice: BackendChoice) -> Result<Arc<dyn ComputeBackend>> {
    match choice {
        BackendChoice::Serial => Ok(Arc::new(SerialBackend)),
        BackendChoice::Cpu { threads: Some(n) } => Ok(Arc::new(CpuBackend::with_threads(n)?)),
        BackendChoice::Cpu { threads: None } => Ok(Arc::new(CpuBackend::new())),
    }
}

/// Print `material`'s bandgap at each temperature.
///
/// With [`BandgapGuard::Strict`] the first rejected temperature ends the
/// table with an error; rows already written stay in `out`.
pub fn render_bandgap_table<W: Write>(
    material: &VarshniMaterial,
    temperatures: &[f64],
    guard: BandgapGuard,
    out: &mut W,
) -> Result<()> {
    let model = BandgapModel::new(guard);
    let params = material.varshni();
    writeln!(out, "{} ({})", material.name(), material.id())?;
    for &t in temperatures {
        let eg = model
            .evaluate(t, &params)
            .with_context(|| format!("{} at T={} K", material.id(), t))?;
        writeln!(out, "  T={:>8.2} K  Eg={:.4} eV", t, eg)?;
    }
    Ok(())
}

fn create_output_file(path: &Path) -> Result<std::io::BufWriter<std::fs::File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(std::io::BufWriter::new(file))
}

/// Render spectra in long format, one row per (temperature, energy) sample.
pub fn render_spectra_csv<W: Write>(output: &SimulationOutput, out: &mut W) -> Result<()> {
    writeln!(out, "# photolum: PL spectra")?;
    writeln!(out, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        out,
        "# material: {} (Eg0={} eV, alpha={} eV/K, beta={} K)",
        output.material, output.params.eg0, output.params.alpha, output.params.beta
    )?;
    writeln!(out, "#")?;
    writeln!(out, "temperature_K,energy_eV,intensity")?;

    for s in &output.spectra {
        for (e, i) in s.energies.iter().zip(&s.intensities) {
            writeln!(out, "{:.4},{:.6},{:.6e}", s.temperature, e, i)?;
        }
    }
    Ok(())
}

/// Render the Eg(T) table.
pub fn render_bandgap_csv<W: Write>(spectra: &[Spectrum], out: &mut W) -> Result<()> {
    writeln!(out, "temperature_K,eg_eV")?;
    for s in spectra {
        writeln!(out, "{:.4},{:.6}", s.temperature, s.eg)?;
    }
    Ok(())
}

/// Format `x` the way JavaScript's `Number.prototype.toString` does.
///
/// Shortest round-trip digits, with exponent notation (`1e-7`, `1e+21`)
/// below 1e-6 and from 1e21 up.
fn js_number(x: f64) -> String {
    if x.is_nan() {
        return "NaN".into();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if x == 0.0 {
        return "0".into();
    }
    let magnitude = x.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", x);
    }
    let sci = format!("{:e}", x);
    match sci.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => sci,
    }
}

/// Render one row per spectrum: `T=<T>,<E>:<I>,<E>:<I>,...`.
///
/// Numbers are written as a browser would print them.
pub fn render_compact<W: Write>(spectra: &[Spectrum], out: &mut W) -> Result<()> {
    for s in spectra {
        write!(out, "T={}", js_number(s.temperature))?;
        for (e, i) in s.energies.iter().zip(&s.intensities) {
            write!(out, ",{}:{}", js_number(*e), js_number(*i))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write spectra to a long-format CSV file with a metadata header.
pub fn write_spectra_csv(output: &SimulationOutput, path: &Path) -> Result<()> {
    let mut file = create_output_file(path)?;
    render_spectra_csv(output, &mut file)?;
    file.flush()?;
    println!("Spectra written to: {}", path.display());
    Ok(())
}

/// Write the bandgap table to a CSV file.
pub fn write_bandgap_csv(spectra: &[Spectrum], path: &Path) -> Result<()> {
    let mut file = create_output_file(path)?;
    render_bandgap_csv(spectra, &mut file)?;
    file.flush()?;
    println!("Bandgap table written to: {}", path.display());
    Ok(())
}

/// Write spectra in the compact one-row-per-temperature format.
pub fn write_compact(spectra: &[Spectrum], path: &Path) -> Result<()> {
    let mut file = create_output_file(path)?;
    render_compact(spectra, &mut file)?;
    file.flush()?;
    println!("Compact spectra written to: {}", path.display());
    Ok(())
}

/// Write spectra to a JSON file.
pub fn write_spectra_json(spectra: &[Spectrum], path: &Path) -> Result<()> {
    let mut file = create_output_file(path)?;
    serde_json::to_writer_pretty(&mut file, spectra).context("JSON serialisation error")?;
    file.flush().with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Spectra (JSON) written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use approx::assert_abs_diff_eq;
    use photolum_core::spectrum::generate_spectrum;
    use photolum_core::types::SimulationConfig;

    const JOB: &str = r#"
        [material]
        preset = "Perovskite"

        [simulation]
        t_min = 100.0
        t_max = 400.0
        steps = 4
        peak_fwhm = 0.05
        resolution = 5
    "#;

    fn output() -> SimulationOutput {
        run_simulation(&parse_config(JOB).unwrap()).unwrap()
    }

    #[test]
    fn test_run_simulation_produces_configured_sweep() {
        let out = output();
        assert_eq!(out.material, "Perovskite");
        assert_eq!(out.spectra.len(), 4);
        assert_eq!(out.spectra[3].temperature, 400.0);
        assert_abs_diff_eq!(out.spectra[0].eg, 2.283_333, epsilon = 1e-6);
        assert!(out.spectra.iter().all(|s| s.len() == 5));
    }

    #[test]
    fn test_cpu_backend_matches_serial() {
        let serial = output();
        let cpu_job = parse_config(&format!("{JOB}\n backend = \"cpu\"\n threads = 2")).unwrap();
        let cpu = run_simulation(&cpu_job).unwrap();
        assert_eq!(serial.spectra, cpu.spectra);
    }

    #[test]
    fn test_spectra_csv_has_header_and_one_row_per_sample() {
        let mut buf = Vec::new();
        render_spectra_csv(&output(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let rows: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(rows[0], "temperature_K,energy_eV,intensity");
        assert_eq!(rows.len(), 1 + 4 * 5);
        assert!(rows[1].starts_with("100.0000,"));
        assert!(text.contains("# material: Perovskite"));
    }

    #[test]
    fn test_bandgap_csv() {
        let mut buf = Vec::new();
        render_bandgap_csv(&output().spectra, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "200.0000,2.250000");
    }

    #[test]
    fn test_compact_rows() {
        let mut buf = Vec::new();
        render_compact(&output().spectra, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("T=200,"));
        assert_eq!(lines[1].split(',').count(), 1 + 5);
        // Middle sample of an odd-length window is the line centre.
        assert!(lines[1].split(',').nth(3).unwrap().ends_with(":1"));
    }

    #[test]
    fn test_js_number_formatting() {
        assert_eq!(js_number(123.0), "123");
        assert_eq!(js_number(2.25), "2.25");
        assert_eq!(js_number(0.000001), "0.000001");
        assert_eq!(js_number(1e-7), "1e-7");
        assert_eq!(js_number(1.5e-120), "1.5e-120");
        assert_eq!(js_number(1e21), "1e+21");
        assert_eq!(js_number(-2.5e22), "-2.5e+22");
        assert_eq!(js_number(1e20), "100000000000000000000");
        assert_eq!(js_number(-0.0), "0");
        assert_eq!(js_number(f64::NAN), "NaN");
        assert_eq!(js_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_compact_tail_uses_exponent_form() {
        let material = photolum_materials::lookup("Perovskite").unwrap().varshni();
        let s = generate_spectrum(300.0, &material, &SimulationConfig::default()).unwrap();
        let mut buf = Vec::new();
        render_compact(std::slice::from_ref(&s), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        // Edge sample sits 0.5 eV from the centre, around 1e-120.
        let first = text.trim_end().split(',').nth(1).unwrap();
        let (energy, intensity) = first.split_once(':').unwrap();
        assert_eq!(energy.parse::<f64>().unwrap(), s.energies[0]);
        assert!(intensity.contains("e-"), "tail written as {intensity}");
        assert!(intensity.len() < 30, "tail written as {intensity}");
        assert_eq!(intensity.parse::<f64>().unwrap(), s.intensities[0]);
    }

    #[test]
    fn test_json_export_writes_into_new_directory() {
        let dir = std::env::temp_dir().join(format!("photolum-json-{}", std::process::id()));
        let path = dir.join("nested").join("spectra.json");
        let spectra = output().spectra;
        write_spectra_json(&spectra, &path).unwrap();
        let back: Vec<Spectrum> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.len(), spectra.len());
        for (b, s) in back.iter().zip(&spectra) {
            assert_eq!(b.temperature, s.temperature);
            assert_abs_diff_eq!(b.eg, s.eg, epsilon = 1e-12);
            assert_eq!(b.intensities.len(), s.intensities.len());
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_json_export_error_names_the_path() {
        let dir = std::env::temp_dir().join(format!("photolum-blocked-{}", std::process::id()));
        std::fs::write(&dir, "not a directory").unwrap();
        let path = dir.join("spectra.json");
        let err = write_spectra_json(&output().spectra, &path).unwrap_err();
        assert!(format!("{err:#}").contains(&dir.display().to_string()));
        std::fs::remove_file(&dir).unwrap();
    }

    #[test]
    fn test_bandgap_table_rows() {
        let gaas = photolum_materials::lookup("GaAs").unwrap();
        let mut buf = Vec::new();
        render_bandgap_table(&gaas, &[0.0, 300.0], BandgapGuard::Permissive, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "Gallium arsenide (GaAs)",
                "  T=    0.00 K  Eg=1.5190 eV",
                "  T=  300.00 K  Eg=1.4225 eV",
            ]
        );
    }

    #[test]
    fn test_bandgap_table_permissive_prints_pole() {
        let gaas = photolum_materials::lookup("GaAs").unwrap();
        let mut buf = Vec::new();
        render_bandgap_table(&gaas, &[-204.0], BandgapGuard::Permissive, &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("Eg=-inf eV"));
    }

    #[test]
    fn test_bandgap_table_strict_stops_at_pole() {
        let gaas = photolum_materials::lookup("GaAs").unwrap();
        let mut buf = Vec::new();
        let temps = [300.0, -204.0, 77.0];
        let err = render_bandgap_table(&gaas, &temps, BandgapGuard::Strict, &mut buf).unwrap_err();
        assert!(format!("{err:#}").contains("T + beta is zero"));
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("T=  300.00 K"));
        assert!(!text.contains("T=   77.00 K"));
    }

    #[test]
    fn test_create_backend_honours_thread_count() {
        let backend = create_backend(BackendChoice::Cpu { threads: Some(2) }).unwrap();
        assert!(backend.device_info().name.contains('2'));
        assert!(create_backend(BackendChoice::Serial).is_ok());
    }
}
