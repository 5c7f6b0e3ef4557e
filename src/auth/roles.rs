// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles and the authorities they grant.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// ## Role Hierarchy
///
/// - `User` - Reads users and customers
/// - `Manager` - Also updates users and customers
/// - `Admin` - Also creates customers and invoices
/// - `SysAdmin` - Everything, including deleting users and customers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    /// Newly registered users get the least privileged role.
    #[default]
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_MANAGER")]
    Manager,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_SYSADMIN")]
    SysAdmin,
}

impl Role {
    /// Authority name carried in tokens, e.g. `ROLE_USER`.
    pub fn authority(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Manager => "ROLE_MANAGER",
            Role::Admin => "ROLE_ADMIN",
            Role::SysAdmin => "ROLE_SYSADMIN",
        }
    }

    /// Permissions granted to the role.
    pub fn permissions(&self) -> &'static [&'static str] {
        match self {
            Role::User => &["READ:USER", "READ:CUSTOMER", "READ:INVOICE"],
            Role::Manager => &[
                "READ:USER",
                "READ:CUSTOMER",
                "READ:INVOICE",
                "UPDATE:USER",
                "UPDATE:CUSTOMER",
            ],
            Role::Admin => &[
                "READ:USER",
                "READ:CUSTOMER",
                "READ:INVOICE",
                "UPDATE:USER",
                "UPDATE:CUSTOMER",
                "CREATE:USER",
                "CREATE:CUSTOMER",
                "CREATE:INVOICE",
            ],
            Role::SysAdmin => &[
                "READ:USER",
                "READ:CUSTOMER",
                "READ:INVOICE",
                "UPDATE:USER",
                "UPDATE:CUSTOMER",
                "CREATE:USER",
                "CREATE:CUSTOMER",
                "CREATE:INVOICE",
                "DELETE:USER",
                "DELETE:CUSTOMER",
            ],
        }
    }

    /// Role name followed by its permissions, as embedded in access tokens.
    pub fn granted_authorities(&self) -> Vec<String> {
        std::iter::once(self.authority())
            .chain(self.permissions().iter().copied())
            .map(str::to_string)
            .collect()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.authority())
    }
}
