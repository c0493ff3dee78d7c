//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
//! Los valores aquí son los de menor prioridad: el archivo de reglas y los
//! flags de la CLI los sobrescriben.
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv(); // ignora error si no existe .env
});

/// Configuración global de la aplicación.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directorio de trabajo: archivos intermedios, bitácora y raíz de destino.
    pub work_dir: PathBuf,
    /// Prefijo de la raíz de destino si el archivo de reglas no lo define.
    pub dir_prefix: Option<String>,
    /// Código por defecto (`mesa`, `flash`) si el archivo de reglas no lo define.
    pub default_code: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let work_dir = env::var("PERMSWEEP_WORK_DIR").ok()
                                                     .filter(|v| !v.trim().is_empty())
                                                     .map(PathBuf::from)
                                                     .unwrap_or_else(|| PathBuf::from("."));
        let dir_prefix = non_empty_var("PERMSWEEP_DIR_PREFIX");
        let default_code = non_empty_var("PERMSWEEP_CODE");
        Self { work_dir,
               dir_prefix,
               default_code }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
