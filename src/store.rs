// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory store for users, customers and invoices.
//!
//! Records are keyed by sequential ids in `BTreeMap`s so listings come back
//! in creation order. The store is shared behind `AppState`'s `RwLock`.

use std::collections::BTreeMap;

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};

use crate::auth::Role;
use crate::error::ApiError;
use crate::models::{
    CreateCustomerRequest, Customer, Invoice, NewInvoice, Page, PageQuery, RegisterRequest, User,
};

/// Length of generated invoice numbers.
pub const INVOICE_NUMBER_LEN: usize = 8;

/// Random uppercase alphanumeric invoice number, e.g. `7QX2K9ZD`.
pub fn generate_invoice_number() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(INVOICE_NUMBER_LEN)
        .map(char::from)
        .collect::<String>()
        .to_ascii_uppercase()
}

#[derive(Default)]
pub struct InMemoryStore {
    users: BTreeMap<u64, User>,
    customers: BTreeMap<u64, Customer>,
    invoices: BTreeMap<u64, Invoice>,
    next_user_id: u64,
    next_customer_id: u64,
    next_invoice_id: u64,
}

fn next_id(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Store a new user. Emails are unique, compared case-insensitively.
    pub fn insert_user(
        &mut self,
        request: RegisterRequest,
        password_hash: String,
        role: Role,
    ) -> Result<User, ApiError> {
        let email = request.email.trim().to_string();
        if self.user_by_email(&email).is_some() {
            return Err(ApiError::conflict(
                "Email already in use. Please use a different email and try again",
            ));
        }

        let id = next_id(&mut self.next_user_id);
        let user = User {
            id,
            first_name: request.first_name,
            last_name: request.last_name,
            email,
            password_hash,
            address: request.address,
            phone: request.phone,
            title: request.title,
            bio: request.bio,
            image_url: None,
            enabled: true,
            not_locked: true,
            using_mfa: false,
            role,
            created_at: Utc::now(),
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        let email = email.trim();
        self.users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    pub fn create_customer(&mut self, request: CreateCustomerRequest) -> Customer {
        let id = next_id(&mut self.next_customer_id);
        let customer = Customer {
            id,
            name: request.name,
            email: request.email,
            customer_type: request.customer_type,
            status: request.status,
            address: request.address,
            phone: request.phone,
            image_url: request.image_url,
            created_at: Utc::now(),
        };
        self.customers.insert(id, customer.clone());
        customer
    }

    pub fn get_customer(&self, customer_id: u64) -> Result<Customer, ApiError> {
        self.customers.get(&customer_id).cloned().ok_or_else(|| {
            ApiError::not_found(format!("Customer with id {customer_id} has not been found"))
        })
    }

    pub fn get_customers(&self, query: PageQuery) -> Page<Customer> {
        let all: Vec<Customer> = self.customers.values().cloned().collect();
        Page::of(&all, query)
    }

    // -------------------------------------------------------------------------
    // Invoices
    // -------------------------------------------------------------------------

    /// Store a standalone invoice, stamping its issue time and number.
    pub fn create_invoice(&mut self, invoice: NewInvoice) -> Invoice {
        let id = next_id(&mut self.next_invoice_id);
        let invoice = Invoice {
            id,
            invoice_number: generate_invoice_number(),
            services: invoice.services,
            date: invoice.date,
            status: invoice.status,
            total: invoice.total,
            issued_at: Some(Utc::now()),
            customer_id: None,
        };
        self.invoices.insert(id, invoice.clone());
        invoice
    }

    pub fn get_invoices(&self, query: PageQuery) -> Page<Invoice> {
        let all: Vec<Invoice> = self.invoices.values().cloned().collect();
        Page::of(&all, query)
    }

    /// Store an invoice billed to an existing customer.
    pub fn add_invoice_to_customer(
        &mut self,
        customer_id: u64,
        invoice: NewInvoice,
    ) -> Result<Invoice, ApiError> {
        let invoice_number = generate_invoice_number();
        let customer = self.get_customer(customer_id)?;

        let id = next_id(&mut self.next_invoice_id);
        let invoice = Invoice {
            id,
            invoice_number,
            services: invoice.services,
            date: invoice.date,
            status: invoice.status,
            total: invoice.total,
            issued_at: None,
            customer_id: Some(customer.id),
        };
        self.invoices.insert(id, invoice.clone());
        Ok(invoice)
    }

    pub fn get_invoice(&self, invoice_id: u64) -> Result<Invoice, ApiError> {
        self.invoices.get(&invoice_id).cloned().ok_or_else(|| {
            ApiError::not_found(format!("Invoice with id {invoice_id} has not been found"))
        })
    }

    pub fn invoices_for_customer(&self, customer_id: u64) -> Vec<Invoice> {
        self.invoices
            .values()
            .filter(|invoice| invoice.customer_id == Some(customer_id))
            .cloned()
            .collect()
    }
}
