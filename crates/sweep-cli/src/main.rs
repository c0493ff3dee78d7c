//! permsweep: genera un barrido de archivos de parámetros a partir de un
//! archivo de reglas JSON.
//!
//! Uso: `permsweep run <RULES.json> [--template PATH] [--code NAME] ...`

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::{debug, error, info, LevelFilter};

use permsweep::config::CONFIG;
use permsweep::{CodeProfile, CoreError, RenderedCombination, RulesFile};

#[derive(Parser, Debug)]
#[command(name = "permsweep", version)]
#[command(about = "Genera barridos de parámetros para códigos de simulación (MESA, FLASH)")]
struct Cli {
    /// Log detallado (ignora RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ejecuta un barrido descrito por un archivo de reglas
    Run(RunArgs),
    /// Lista los códigos soportados y sus marcadores
    Codes,
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Archivo de reglas JSON
    rules: PathBuf,

    /// Plantilla de parámetros (sobrescribe `template` del archivo)
    #[arg(long)]
    template: Option<PathBuf>,

    /// Código de simulación (sobrescribe `code` del archivo)
    #[arg(long)]
    code: Option<String>,

    /// Directorio plantilla de ejecutables a copiar en cada ejecución
    #[arg(long = "exec-dir")]
    exec_dir: Option<PathBuf>,

    /// Nombre de la raíz de destino
    #[arg(long)]
    prefix: Option<String>,

    /// Directorio de trabajo (por defecto PERMSWEEP_WORK_DIR o el actual)
    #[arg(long = "work-dir")]
    work_dir: Option<PathBuf>,

    /// Solo muestra las combinaciones, sin escribir nada
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Imprime el resumen como JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    permsweep::config::init_dotenv();
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::builder().filter_level(LevelFilter::Debug).init();
        info!("log detallado activado (se ignora RUST_LOG)");
    } else {
        env_logger::builder().filter_level(LevelFilter::Info).parse_default_env().init();
        debug!("log configurado desde variables de entorno");
    }

    let result = match cli.command {
        Command::Codes => {
            print_codes();
            Ok(())
        }
        Command::Run(args) => run(args),
    };

    if let Err(e) = result {
        error!("{e}");
        process::exit(if e.is_configuration() { 2 } else { 5 });
    }
}

fn print_codes() {
    for p in CodeProfile::ALL {
        println!("{:<8} comentario '{}'  exponente '{}'", p.name(), p.comment_marker(), p.exponent_marker());
    }
}

fn run(args: RunArgs) -> Result<(), CoreError> {
    let mut file = RulesFile::from_path(&args.rules)?;
    if let Some(code) = args.code {
        file.code = Some(code);
    }
    if let Some(prefix) = args.prefix {
        file.dir_prefix = Some(prefix);
    }
    // las rutas de la CLI son relativas al directorio actual, no al archivo
    let mut config = (*CONFIG).clone();
    if let Some(dir) = args.work_dir {
        config.work_dir = dir;
    }

    let mut builder = file.sweep_builder(&config)?;
    if let Some(t) = args.template {
        builder = builder.template(t);
    }
    if let Some(exec) = args.exec_dir {
        builder = builder.exec_template(exec);
    }
    let sweep = builder.build()?;

    if args.dry_run {
        let plan = sweep.plan()?;
        print_plan(&plan);
        info!("{} combinaciones (sin escribir archivos)", plan.len());
        return Ok(());
    }

    let report = sweep.run()?;
    if args.json {
        let text = serde_json::to_string_pretty(&report).map_err(|e| CoreError::Internal(e.to_string()))?;
        println!("{text}");
    } else {
        info!("{} combinaciones en {} (bitácora: {})",
              report.combinations,
              report.root.display(),
              report.log_path.display());
    }
    Ok(())
}

fn print_plan(plan: &[RenderedCombination]) {
    for c in plan {
        let values: Vec<String> = c.iter().map(|(k, v)| format!("{k}={v}")).collect();
        println!("c{}\t{}", c.id(), values.join("\t"));
    }
}
