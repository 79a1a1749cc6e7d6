pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Grouped by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Capacity of the channel carrying messages into the view task.
    pub const MESSAGE_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // SERVER CONFIGURATION
    // =============================================================================

    /// Server used when neither the CLI, the config file nor the environment names one.
    pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

    /// Environment variable that selects the server.
    pub const SERVER_URL_ENV: &str = "PR_DASHBOARD_URL";

    /// Path of the record list endpoint.
    pub const PRS_ENDPOINT: &str = "/api/prs";

    /// Path of the Socket.IO endpoint.
    pub const SOCKET_IO_PATH: &str = "/socket.io/";

    /// HTTP request configuration
    pub mod http {
        use std::time::Duration;

        /// Connect timeout (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Whole-request timeout (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    /// Push channel reconnect configuration
    pub mod reconnect {
        use std::time::Duration;

        /// First delay after a dropped or failed connection (milliseconds)
        pub const INITIAL_BACKOFF_MS: u64 = 1_000;

        /// Upper bound for the reconnect delay (milliseconds)
        pub const MAX_BACKOFF_MS: u64 = 30_000;

        /// Time allowed for the Engine.IO open packet after connecting
        pub const HANDSHAKE_TIMEOUT_SECS: u64 = 10;

        pub const fn initial_backoff() -> Duration {
            Duration::from_millis(INITIAL_BACKOFF_MS)
        }

        pub const fn max_backoff() -> Duration {
            Duration::from_millis(MAX_BACKOFF_MS)
        }

        pub const fn handshake_timeout() -> Duration {
            Duration::from_secs(HANDSHAKE_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // PAGE ELEMENTS
    // =============================================================================

    /// Identifiers of the page elements the controller reads and writes.
    pub mod elements {
        pub const TOTAL_COUNT: &str = "total-prs";
        pub const OPEN_COUNT: &str = "open-prs";
        pub const CLOSED_COUNT: &str = "closed-prs";
        pub const MERGED_COUNT: &str = "merged-prs";
        pub const REPO_FILTER: &str = "repo-filter";
        pub const STATUS_FILTER: &str = "status-filter";
        pub const AUTHOR_FILTER: &str = "author-filter";
        pub const SEARCH_INPUT: &str = "search-input";
        pub const CONTAINER: &str = "pr-container";
    }
}
