//! Then steps for drag-and-drop BDD scenarios.

use super::world::{BoardWorld, column_titles, parse_column};
use rstest_bdd_macros::then;
use taskboard::task::domain::TaskStatus;

#[then(r#"the "{column}" column reads "{titles}""#)]
fn column_reads(world: &BoardWorld, column: String, titles: String) -> Result<(), eyre::Report> {
    let status = parse_column(&column)?;
    let expected: Vec<String> = titles.split(", ").map(str::to_owned).collect();
    let actual = column_titles(&world.store.tasks(), status);
    if actual != expected {
        return Err(eyre::eyre!(
            "expected {column} column {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"the "{column}" column is empty"#)]
fn column_is_empty(world: &BoardWorld, column: String) -> Result<(), eyre::Report> {
    let status = parse_column(&column)?;
    let actual = column_titles(&world.store.tasks(), status);
    if !actual.is_empty() {
        return Err(eyre::eyre!("expected empty {column} column, found {actual:?}"));
    }
    Ok(())
}

#[then("the backend holds the same columns")]
fn backend_matches(world: &BoardWorld) -> Result<(), eyre::Report> {
    let local = world.store.tasks();
    let remote = world.gateway.tasks();
    for status in TaskStatus::ALL {
        let local_column = column_titles(&local, status);
        let remote_column = column_titles(&remote, status);
        if local_column != remote_column {
            return Err(eyre::eyre!(
                "{} column diverged: local {local_column:?}, backend {remote_column:?}",
                status.as_str()
            ));
        }
    }
    Ok(())
}

#[then("the move is reported as failed")]
fn move_reported_as_failed(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_commit.as_ref() {
        Some(Err(_)) => Ok(()),
        Some(Ok(())) => Err(eyre::eyre!("expected the move commit to fail")),
        None => Err(eyre::eyre!("no move was committed")),
    }
}

#[then(r#"the user is told "{message}""#)]
fn user_is_told(world: &BoardWorld, message: String) -> Result<(), eyre::Report> {
    let errors = world.notifier.errors();
    if errors != [message.clone()] {
        return Err(eyre::eyre!("expected notice {message:?}, found {errors:?}"));
    }
    Ok(())
}
