//! # Resolución del archivo pedido
//! src/worker/resource.rs
//!
//! Traduce el nombre pedido a un archivo dentro del document root y lo
//! abre una sola vez. El mismo handle decide el status y alimenta el body,
//! así el header y el body nunca se contradicen.

use super::Site;
use crate::http::{ContentType, StatusCode};
use std::fs::File;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Resultado de buscar el archivo pedido
#[derive(Debug)]
pub enum Resource {
    /// Archivo regular abierto para lectura
    Found {
        file: File,
        name: String,
        content_type: ContentType,
    },

    /// No existe, no es un archivo regular o queda fuera del root
    Missing { name: String },
}

impl Resource {
    /// Busca y abre el archivo pedido dentro del sitio
    ///
    /// Un nombre vacío (request a `/`) se sirve con el archivo índice. Un
    /// symlink cuyo destino cae fuera del root cuenta como inexistente.
    pub fn open(site: &Site, requested: &str) -> Self {
        let name = if requested.is_empty() {
            site.index.clone()
        } else {
            requested.to_string()
        };

        let contained = resolve(&site.root, &name).and_then(|path| contain(&site.root, &path));
        let Some(path) = contained else {
            debug!(name = %name, "no file under document root");
            return Resource::Missing { name };
        };

        match File::open(&path).and_then(|file| file.metadata().map(|meta| (file, meta))) {
            Ok((file, meta)) if meta.is_file() => {
                let content_type = ContentType::from_name(&name);
                Resource::Found {
                    file,
                    name,
                    content_type,
                }
            }
            Ok(_) => {
                debug!(path = %path.display(), "not a regular file");
                Resource::Missing { name }
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cannot open file");
                Resource::Missing { name }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Resource::Found { .. } => StatusCode::Ok,
            Resource::Missing { .. } => StatusCode::NotFound,
        }
    }

    /// El 404 siempre lleva body HTML
    pub fn content_type(&self) -> ContentType {
        match self {
            Resource::Found { content_type, .. } => *content_type,
            Resource::Missing { .. } => ContentType::Html,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Resource::Found { name, .. } | Resource::Missing { name } => name,
        }
    }
}

/// Une el nombre pedido al root, rechazando lo que pueda escaparse
///
/// Solo se aceptan componentes normales (y `.`); `..`, rutas absolutas y
/// prefijos de Windows devuelven `None`.
pub fn resolve(root: &Path, name: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    let mut pushed = false;

    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => {
                path.push(part);
                pushed = true;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    pushed.then_some(path)
}

/// Sigue los symlinks y exige que el destino quede dentro del root
///
/// Retorna la ruta canónica, que es la que se abre.
fn contain(root: &Path, path: &Path) -> Option<PathBuf> {
    let root = root.canonicalize().ok()?;
    let canonical = path.canonicalize().ok()?;

    if canonical.starts_with(&root) {
        Some(canonical)
    } else {
        debug!(path = %canonical.display(), "symlink target outside document root");
        None
    }
}
