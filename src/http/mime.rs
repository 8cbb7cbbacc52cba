//! # Detección de Content-Type
//! src/http/mime.rs
//!
//! Infiere el `Content-Type` a partir de la extensión del archivo pedido.
//! La tabla es fija: lo que no reconocemos se sirve como
//! `application/octet-stream`.

/// Tipos de contenido que sabe servir el worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Html,
    Gif,
    Jpeg,
    Png,
    Icon,
    OctetStream,
}

impl ContentType {
    /// Infiere el tipo a partir del nombre pedido
    ///
    /// La extensión es lo que sigue al último `.` y se compara sin
    /// distinguir mayúsculas.
    ///
    /// # Ejemplo
    /// ```
    /// use web_worker::http::ContentType;
    ///
    /// assert_eq!(ContentType::from_name("index.html"), ContentType::Html);
    /// assert_eq!(ContentType::from_name("logo.PNG"), ContentType::Png);
    /// assert_eq!(ContentType::from_name("README"), ContentType::OctetStream);
    /// ```
    pub fn from_name(name: &str) -> Self {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        Self::from_extension(extension.as_deref())
    }

    /// Mapea una extensión (sin el punto, ya en minúsculas) a su tipo
    pub fn from_extension(extension: Option<&str>) -> Self {
        match extension {
            Some("html" | "htm") => ContentType::Html,
            Some("gif") => ContentType::Gif,
            Some("jpeg" | "jpg") => ContentType::Jpeg,
            Some("png") => ContentType::Png,
            Some("ico") => ContentType::Icon,
            _ => ContentType::OctetStream,
        }
    }

    /// Valor del header `Content-Type`
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Html => "text/html",
            ContentType::Gif => "image/gif",
            ContentType::Jpeg => "image/jpeg",
            ContentType::Png => "image/png",
            ContentType::Icon => "image/x-icon",
            ContentType::OctetStream => "application/octet-stream",
        }
    }

    /// Solo el HTML pasa por la sustitución de placeholders
    pub fn is_html(&self) -> bool {
        matches!(self, ContentType::Html)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
