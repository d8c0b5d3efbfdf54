//! Supabase Storage client and local artifact cleanup.
//!
//! [`supabase::SupabaseStorage`] uploads rendered videos under freshly
//! generated object names and resolves their public URLs.
//! [`cleanup::delete_local_video`] removes the local artifact after upload;
//! it is advisory and never fails the request.

pub mod cleanup;
pub mod supabase;

pub use supabase::{StorageConfig, StorageError, SupabaseStorage};
