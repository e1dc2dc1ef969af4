use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::api::UsersClient;
use crate::config::AppConfig;
use crate::users::{UserRecord, assign_departments, filter_users, group_by_department, title_case};

/// One-shot plain mode: fetch, assign departments, optionally filter,
/// print the grouped listing. No debounce here; there is no keystroke
/// stream to settle.
pub async fn run_plain(cfg: &AppConfig) -> Result<()> {
    let client = UsersClient::new(cfg.base_url.clone(), &cfg.http)?;
    let raw = client
        .fetch_page(cfg.per_page)
        .await
        .context("load users")?;
    let users = match cfg.seed {
        Some(seed) => assign_departments(raw, &mut StdRng::seed_from_u64(seed)),
        None => assign_departments(raw, &mut rand::thread_rng()),
    };
    let active = match cfg.search.as_deref() {
        Some(term) if !term.is_empty() => filter_users(&users, term),
        _ => users,
    };
    print!("{}", render_listing(&active));
    Ok(())
}

fn render_listing(active: &[UserRecord]) -> String {
    let mut out = String::new();
    for (dept, members) in group_by_department(active) {
        out.push_str(&title_case(dept.as_str()));
        out.push('\n');
        for u in members {
            out.push_str(&format!("  {} {} - {}\n", u.first_name, u.last_name, u.email));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::Department;

    fn record(first: &str, department: Department) -> UserRecord {
        UserRecord {
            id: 1,
            first_name: first.to_string(),
            last_name: "Test".to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            avatar: String::new(),
            department,
        }
    }

    #[test]
    fn listing_groups_and_sorts() {
        let users = vec![
            record("Tobias", Department::Marketing),
            record("Anna", Department::Finance),
        ];
        let out = render_listing(&users);
        assert_eq!(
            out,
            "Finance\n  Anna Test - anna@example.com\n\nMarketing\n  Tobias Test - tobias@example.com\n\n"
        );
    }

    #[test]
    fn listing_of_empty_set_is_empty() {
        assert_eq!(render_listing(&[]), "");
    }
}
