use crate::{job, settings::Settings, Error, Result};
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

pub async fn schedule(settings: &Settings, scheduler: &mut JobScheduler) -> Result {
    scheduler.add(to_job(settings)?).await?;
    Ok(())
}

fn to_job(settings: &Settings) -> Result<CronJob> {
    CronJob::new_async("@daily", {
        let inner = settings.clone();
        move |_uuid, _lock| {
            Box::pin({
                let settings = inner.clone();
                async move {
                    if let Err(err) = job::daily(&settings).await {
                        tracing::error!(?err, "failed to run daily job");
                    }
                }
            })
        }
    })
    .map_err(Error::from)
}
