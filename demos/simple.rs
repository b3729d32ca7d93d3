use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wirebox::*;

// Define regular traits and implementor structs

trait IServiceA: Send + Sync {
    fn job_a(&self) -> String;
}

trait IServiceB: Send + Sync {
    fn job_b(&self) -> String;
}

trait IServiceC: Send + Sync {
    fn job_c(&self) -> String;
}

#[derive(Default)]
struct ServiceA {
    service_b: Inject<dyn IServiceB>,
}

impl IServiceA for ServiceA {
    fn job_a(&self) -> String {
        let inner = self.service_b.get().map(|b| b.job_b()).unwrap_or_default();
        format!("jobA({inner})")
    }
}

#[derive(Default)]
struct ServiceB {
    service_c: Inject<dyn IServiceC>,
}

impl IServiceB for ServiceB {
    fn job_b(&self) -> String {
        let inner = self.service_c.get().map(|c| c.job_c()).unwrap_or_default();
        format!("jobB({inner})")
    }
}

#[derive(Default)]
struct ServiceC;

impl IServiceC for ServiceC {
    fn job_c(&self) -> String {
        "jobC".into()
    }
}

// Declare contracts and injectable fields

service!(ServiceA => dyn IServiceA; inject service_b);
service!(ServiceB => dyn IServiceB; inject service_c);
service!(ServiceC => dyn IServiceC);

fn main() -> Result<(), WiringError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wirebox=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let context = ContainerBuilder::new()
        .bind::<dyn IServiceC, ServiceC>()?
        .bind::<dyn IServiceB, ServiceB>()?
        .bind::<dyn IServiceA, ServiceA>()?
        .build()?;

    let Some(a) = context.get_service::<dyn IServiceA>() else {
        tracing::error!("IServiceA is not bound");
        std::process::exit(1);
    };
    println!("{}", a.job_a());

    Ok(())
}
