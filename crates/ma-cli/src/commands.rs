use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Show the resolved identity and where the landing page leads
    Status,

    /// Create an account and its profile
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: Option<String>,
    },

    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out (always succeeds locally)
    Logout,

    /// Ask the route guard about a path
    Visit {
        /// Requested path, e.g. /dashboard
        path: String,
    },

    /// Run the onboarding questionnaire and complete onboarding
    Onboard {
        /// Answer as <question-id>=<value>; repeatable, unanswered questions are skipped
        #[arg(long = "answer", value_name = "ID=VALUE")]
        answers: Vec<String>,
    },

    /// List the onboarding questions
    Questions,
}
