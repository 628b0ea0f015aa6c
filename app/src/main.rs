use substations::{bootstrap, migrations::Migrator};
use web::{Application, FrameworkError};

#[tokio::main]
async fn main() -> Result<(), FrameworkError> {
    Application::new()
        .migrations::<Migrator>()
        .log_directives("substations=info,substation_web=info")
        .run(bootstrap::boot)
        .await
}
