//! Stevedore - artifact resolution and deployment state for Nexus-backed deploys
//!
//! Stevedore is the library layer deployment automation calls to work with
//! versioned build artifacts in a Nexus repository: it resolves the
//! symbolic `latest` alias to a concrete version, downloads artifact files
//! into a target directory, builds direct-download URLs, and reports which
//! version a deployment root currently points at.
//!
//! # Architecture
//!
//! - [`coordinate`] - Artifact coordinate parsing (`group:artifact:version:extension`)
//! - [`secrets`] - Secret store capability holding repository config bags
//! - [`config`] - Per-environment repository configuration resolution
//! - [`repository`] - Repository client capability (Nexus v2 REST)
//! - [`resolve`] - `latest`-alias version resolution
//! - [`fetch`] - Artifact download into a destination directory
//! - [`download`] - Direct-download URL construction
//! - [`deploy`] - Deployment state reader (`current`-link convention)
//! - [`platform`] - Platform-abstracted filesystem primitives
//!
//! The secret store and the repository server are external collaborators,
//! injected behind the [`secrets::SecretStore`] and
//! [`repository::RepositoryClient`] traits.
//!
//! # Correctness Invariants
//!
//! 1. Resolving a literal version performs no I/O
//! 2. Coordinates and configs are rebuilt per call; nothing is cached
//! 3. The `current` link is only ever read, never written
//! 4. Absence of `current` is a state, not an error; a broken link is an
//!    error, not a state
//!
//! Every public operation is a blocking call; timeout and retry policy
//! belong to the injected collaborators and the caller.

pub mod config;
pub mod coordinate;
pub mod deploy;
pub mod download;
pub mod fetch;
pub mod platform;
pub mod repository;
pub mod resolve;
pub mod secrets;
