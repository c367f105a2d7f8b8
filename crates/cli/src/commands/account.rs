//! Sign-in, registration and sign-out.

use std::io::{BufRead, Write};

use secrecy::SecretString;
use shopfront_storefront::{Role, Session};

use super::CliError;

/// Read a password from stdin, prompting on stderr.
#[allow(clippy::print_stderr)]
fn read_password() -> Result<SecretString, CliError> {
    eprint!("Password: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(CliError::InvalidInput("password cannot be empty".to_string()));
    }
    Ok(SecretString::from(password.to_owned()))
}

/// Sign in as a customer, or as an administrator with `admin`.
#[allow(clippy::print_stdout)]
pub async fn login(session: &mut Session, email: &str, admin: bool) -> Result<(), CliError> {
    let password = read_password()?;
    let signed_in = if admin {
        session.admin_login(email, &password).await
    } else {
        session.login(email, &password).await
    };

    if signed_in {
        match session.role() {
            Role::Admin => println!("Signed in to the admin console"),
            Role::Customer => println!(
                "Signed in as {email}; cart has {} item(s)",
                session.cart_count()
            ),
        }
    }
    Ok(())
}

/// Create a customer account and sign in to it.
#[allow(clippy::print_stdout)]
pub async fn register(session: &mut Session, name: &str, email: &str) -> Result<(), CliError> {
    let password = read_password()?;
    if session.register(name, email, &password).await {
        println!("Welcome, {name}");
    }
    Ok(())
}

/// Sign out.
#[allow(clippy::print_stdout)]
pub fn logout(session: &mut Session) {
    let next = session.logout();
    println!("Signed out ({next})");
}
