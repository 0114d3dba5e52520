// Constants used in the project. These are "convention over configuration" for now.

/// Port used when neither `--port` nor `ITEMS_PORT` is given.
pub const DEFAULT_PORT: u16 = 3000;

pub const ITEM_NOT_FOUND: &str = "Elemento no encontrado";
pub const ITEM_DELETED: &str = "Elemento eliminado correctamente";
