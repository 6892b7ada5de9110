use crate::driver::{BrowserDriver, DomEvent};
use crate::error::E2eResult;

/// Drag `source` onto `target` with the HTML5 drag-and-drop event sequence.
pub async fn drag_and_drop(
    driver: &dyn BrowserDriver,
    source: &str,
    target: &str,
) -> E2eResult<()> {
    driver.trigger(source, DomEvent::DragStart).await?;
    driver.trigger(target, DomEvent::DragEnter).await?;
    driver.trigger(target, DomEvent::DragOver).await?;
    driver.trigger(target, DomEvent::Drop).await?;
    driver.trigger(source, DomEvent::DragEnd).await
}
