//! # Kinetic Platform SDK
//!
//! Production-ready Rust client for the Kinetic platform REST APIs.
//!
//! ## Features
//!
//! - Four product clients sharing one request surface: Core (spaces, forms,
//!   datastore forms, submissions), Task (engine errors, users, policy
//!   rules), Bridgehub (bridges) and Discussions (discussions, messages,
//!   invitations, participants)
//! - Basic authentication with `SecretString` credential handling
//! - Typed payload builders that normalize shorthand inputs to the wire
//!   shapes the platform expects
//! - Transparent 502 Bad Gateway retry with a configurable limit and delay
//! - Continuation-token aggregation for multi-page result sets
//! - Per-call strict or permissive handling of unexpected response statuses
//! - Policy rule export to and import from pretty-printed JSON files
//! - YAML configuration files with explicit overrides
//! - Mock transport for London-School TDD
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kinetic_sdk::{CoreClient, KineticConfig, SubmissionPayload};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = KineticConfig::builder()
//!         .server("https://space.example.com")
//!         .username("admin")
//!         .password("secret")
//!         .build()?;
//!
//!     let client = CoreClient::new(&config)?;
//!
//!     let payload = SubmissionPayload::new()
//!         .with_origin("origin-submission-id")
//!         .with_value("Status", "Open");
//!     let response = client
//!         .submissions()
//!         .add_submission("services", "general-request", &payload, &[])
//!         .await?;
//!     println!("created with status {}", response.status());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `config` - Configuration types, builder and YAML file loading
//! - `errors` - Error taxonomy and the strict/permissive `ErrorMode`
//! - `http` - Transport trait, request shaping and the 502 retry loop
//! - `payloads` - Typed payloads with shorthand normalization
//! - `pagination` - Continuation-token aggregation
//! - `export` - JSON file export/import helpers
//! - `core`, `task`, `bridgehub`, `discussions` - Product clients and their
//!   services
//! - `mocks` - Mock transport for tests

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod bridgehub;
pub mod config;
pub mod core;
pub mod discussions;
pub mod errors;
pub mod export;
pub mod http;
pub mod pagination;
pub mod payloads;
pub mod task;

// Development/testing module - always available for integration tests
pub mod mocks;

// Client and service re-exports
pub use bridgehub::{BridgehubClient, BridgesService};
pub use discussions::{
    DiscussionsClient, DiscussionsService, InvitationsService, MessagesService,
    ParticipantsService,
};
pub use self::core::{
    CoreClient, DatastoreFormsService, FormsService, MetaService, SpacesService,
    SubmissionsService,
};
pub use task::{ErrorsService, PolicyRulesService, ResolutionAction, TaskClient, UsersService};

// Configuration re-exports
pub use config::{
    KineticConfig, KineticConfigBuilder, SdkOptions, SslVerifyMode, DEFAULT_GATEWAY_RETRY_DELAY,
    DEFAULT_GATEWAY_RETRY_LIMIT, DEFAULT_MAX_REDIRECTS,
};

// Error re-exports
pub use errors::{ErrorMode, KineticError, KineticResult};

// Transport re-exports
pub use http::{
    encode_segment, ApiClient, HttpMethod, HttpRequest, HttpTransport, KineticResponse,
    RawResponse, ReqwestTransport, TransportError,
};

// Payload re-exports
pub use payloads::{
    ConsoleRule, DiscussionPayload, EntityRef, InvitationPayload, MessageContent, MessagePayload,
    PageRef, PolicyRule, PolicyRuleType, SubmissionPayload, UserRef,
};

// Pagination re-exports
pub use pagination::fetch_all_pages;
