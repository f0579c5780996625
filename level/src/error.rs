use thiserror::Error;
use wad::WadError;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error(transparent)]
    Wad(#[from] WadError),
    /// An index in one lump points past the end of another
    #[error("{from} {index} references {to} {id}, but there are only {len}")]
    DanglingReference {
        from: &'static str,
        index: usize,
        to: &'static str,
        id: usize,
        len: usize,
    },
    /// A node child that is not stored before its parent
    #[error("node {node} has child node {child} at or after itself")]
    NodeOrder { node: usize, child: usize },
    #[error("map has no {0}")]
    EmptyLump(&'static str),
}
