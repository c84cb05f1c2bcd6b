//! User-facing message tables.
//!
//! One immutable table per language, selected with [`messages`]. Templates use
//! named `{placeholders}` filled by the helper methods on [`Messages`].

use chrono::Weekday;
use pingbar_config::Lang;

pub struct Messages {
    pub open: &'static str,
    pub closed: &'static str,
    pub unknown: &'static str,
    pub today: &'static str,
    pub always_open: &'static str,
    pub no_schedule: &'static str,
    not_found: &'static str,
    found: &'static str,
    reviews: &'static str,
    /// Sunday first, matching `Weekday::num_days_from_sunday`.
    days: [&'static str; 7],
    pub welcome_title: &'static str,
    pub no_api_key: &'static str,
    pub get_api_key: &'static str,
    pub more_info: &'static str,
    pub error_no_api_key: &'static str,
    pub error_invalid_key: &'static str,
    pub error_no_connection: &'static str,
    pub error_limit_reached: &'static str,
    error_status: &'static str,
    pub missing_city: &'static str,
    config_set: &'static str,
    pub cache_cleared: &'static str,
    pub cache_info_title: &'static str,
    pub cache_dir: &'static str,
    pub cache_entries: &'static str,
    pub cache_ttl: &'static str,
    pub config_title: &'static str,
    pub config_file: &'static str,
    pub not_set: &'static str,
    pub author: &'static str,
    pub tagline: &'static str,
}

impl Messages {
    #[must_use]
    pub fn not_found(&self, business: &str, city: &str) -> String {
        self.not_found
            .replace("{business}", business)
            .replace("{city}", city)
    }

    #[must_use]
    pub fn found(&self, count: usize) -> String {
        self.found.replace("{count}", &count.to_string())
    }

    #[must_use]
    pub fn reviews(&self, count: u32) -> String {
        self.reviews.replace("{count}", &count.to_string())
    }

    #[must_use]
    pub fn day(&self, weekday: Weekday) -> &'static str {
        self.days[weekday.num_days_from_sunday() as usize]
    }

    #[must_use]
    pub fn error_status(&self, code: u16) -> String {
        self.error_status.replace("{code}", &code.to_string())
    }

    #[must_use]
    pub fn config_set(&self, key: &str, value: &str) -> String {
        self.config_set
            .replace("{key}", key)
            .replace("{value}", value)
    }
}

static ES: Messages = Messages {
    open: "ABIERTO",
    closed: "CERRADO",
    unknown: " --:-- ",
    today: "Hoy",
    always_open: "Abierto 24 horas",
    no_schedule: "Horario no disponible",
    not_found: "No se encontraron resultados para \"{business}\" en \"{city}\"",
    found: "Encontrados: {count} resultados",
    reviews: "({count} opiniones)",
    days: [
        "domingo",
        "lunes",
        "martes",
        "miércoles",
        "jueves",
        "viernes",
        "sábado",
    ],
    welcome_title: "Bienvenido a pingbar",
    no_api_key: "No se ha configurado una API Key.",
    get_api_key: "1. Ve a https://serper.dev y crea una cuenta gratuita\n2. Copia tu API Key\n3. Ejecuta: pingbar config set apikey TU_API_KEY",
    more_info: "Más info: pingbar --help",
    error_no_api_key: "No se ha configurado una API Key. Ejecuta: pingbar config set apikey TU_KEY",
    error_invalid_key: "API Key inválida o expirada. Verifica tu key en https://serper.dev",
    error_no_connection: "No se pudo conectar. Verifica tu conexión a internet",
    error_limit_reached: "Has alcanzado el límite de búsquedas. Más info en https://serper.dev",
    error_status: "Error de API: {code}",
    missing_city: "Uso: pingbar <negocio> <ciudad>\nO configura una ciudad por defecto: pingbar config set default-city <ciudad>",
    config_set: "Configuración guardada: {key} = {value}",
    cache_cleared: "Caché limpiada correctamente",
    cache_info_title: "Información de caché:",
    cache_dir: "Directorio",
    cache_entries: "Entradas",
    cache_ttl: "TTL (horas)",
    config_title: "Configuración actual:",
    config_file: "Archivo de configuración",
    not_set: "(no configurado)",
    author: "Autor",
    tagline: "Porque necesitabas saber si el bar está abierto\nantes de salir de casa.",
};

static EN: Messages = Messages {
    open: "OPEN",
    closed: "CLOSED",
    unknown: " --:-- ",
    today: "Today",
    always_open: "Open 24 hours",
    no_schedule: "Schedule not available",
    not_found: "No results found for \"{business}\" in \"{city}\"",
    found: "Found: {count} results",
    reviews: "({count} reviews)",
    days: [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    welcome_title: "Welcome to pingbar",
    no_api_key: "No API Key configured.",
    get_api_key: "1. Go to https://serper.dev and create a free account\n2. Copy your API Key\n3. Run: pingbar config set apikey YOUR_API_KEY",
    more_info: "More info: pingbar --help",
    error_no_api_key: "No API Key configured. Run: pingbar config set apikey YOUR_KEY",
    error_invalid_key: "Invalid or expired API Key. Check your key at https://serper.dev",
    error_no_connection: "Could not connect. Check your internet connection",
    error_limit_reached: "You have reached the search limit. More info at https://serper.dev",
    error_status: "API error: {code}",
    missing_city: "Usage: pingbar <business> <city>\nOr set a default city: pingbar config set default-city <city>",
    config_set: "Configuration saved: {key} = {value}",
    cache_cleared: "Cache cleared successfully",
    cache_info_title: "Cache information:",
    cache_dir: "Directory",
    cache_entries: "Entries",
    cache_ttl: "TTL (hours)",
    config_title: "Current configuration:",
    config_file: "Configuration file",
    not_set: "(not set)",
    author: "Author",
    tagline: "Because you needed to know if the bar is open\nbefore leaving home.",
};

#[must_use]
pub const fn messages(lang: Lang) -> &'static Messages {
    match lang {
        Lang::Es => &ES,
        Lang::En => &EN,
    }
}
