use tabled::Table;

use crate::{
    cli::identity,
    error, info,
    session::SessionContext,
    success,
    types::UserTableRow,
    utils, warning,
};

pub async fn sign_up(name: String, email: String, password: String) {
    let identity = identity();
    let mut session = SessionContext::default();

    let pb = utils::spinner("Creating account...");
    let res = session.sign_up(&identity, &name, &email, &password).await;
    pb.finish_and_clear();

    match res {
        Ok(user) => success!("Welcome, {}! You are signed in as {}.", user.user_name, user.email),
        Err(e) => error!("Sign-up failed. Err: {}", e),
    }
}

pub async fn sign_in(email: String, password: String) {
    let identity = identity();
    let mut session = match SessionContext::initialize(&identity).await {
        Ok(session) => session,
        Err(e) => {
            warning!("Ignoring unusable stored session. Err: {}", e);
            SessionContext::default()
        }
    };

    if let Some(user) = session.current_user() {
        info!("Already signed in as {}.", user.email);
        return;
    }

    let pb = utils::spinner("Signing in...");
    let res = session.sign_in(&identity, &email, &password).await;
    pb.finish_and_clear();

    match res {
        Ok(user) => success!("Signed in as {}.", user.email),
        Err(e) => error!("Sign-in failed. Err: {}", e),
    }
}

pub async fn sign_out() {
    let identity = identity();
    let mut session = SessionContext::default();

    match session.sign_out(&identity).await {
        Ok(()) => success!("Signed out."),
        Err(e) => error!("Sign-out failed. Err: {}", e),
    }
}

pub async fn whoami() {
    let identity = identity();
    match SessionContext::initialize(&identity).await {
        Ok(session) => match session.current_user() {
            Some(user) => println!("{}", Table::new(vec![UserTableRow::from(user)])),
            None => warning!("Not signed in."),
        },
        Err(e) => error!("Failed to restore session. Err: {}", e),
    }
}
