// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    book_follow_up (book_id) {
        book_id -> BigInt,
        book_type -> Nullable<Text>,
        book_no -> Nullable<Text>,
        book_date -> Nullable<Text>,
        directory_name -> Nullable<Text>,
        incoming_no -> Nullable<Text>,
        incoming_date -> Nullable<Text>,
        subject -> Nullable<Text>,
        destination -> Nullable<Text>,
        book_action -> Nullable<Text>,
        book_status -> Nullable<Text>,
        notes -> Nullable<Text>,
        user_id -> Nullable<BigInt>,
        current_date -> Nullable<Text>,
        junction_id -> Nullable<BigInt>,
    }
}

diesel::table! {
    book_junction_bridge (bridge_id) {
        bridge_id -> BigInt,
        book_id -> BigInt,
        junction_id -> BigInt,
    }
}

diesel::table! {
    committee_departments_junction (junction_id) {
        junction_id -> BigInt,
        co_id -> BigInt,
        de_id -> BigInt,
    }
}

diesel::table! {
    committees (co_id) {
        co_id -> BigInt,
        committee_name -> Nullable<Text>,
    }
}

diesel::table! {
    departments (de_id) {
        de_id -> BigInt,
        department_name -> Nullable<Text>,
    }
}

diesel::table! {
    pdf_table (pdf_id) {
        pdf_id -> BigInt,
        book_id -> Nullable<BigInt>,
        book_no -> Nullable<Text>,
        count_pdf -> Nullable<Integer>,
        pdf -> Nullable<Text>,
        user_id -> Nullable<BigInt>,
        current_date -> Nullable<Text>,
    }
}

diesel::table! {
    sessions (session_id) {
        session_id -> BigInt,
        session_token -> Text,
        user_id -> BigInt,
        created_at -> Text,
        last_activity_at -> Text,
        expires_at -> Text,
    }
}

diesel::table! {
    users (user_id) {
        user_id -> BigInt,
        username -> Text,
        password_hash -> Text,
        permission -> Text,
        created_at -> Text,
        last_login_at -> Nullable<Text>,
    }
}

diesel::joinable!(book_follow_up -> users (user_id));
diesel::joinable!(book_follow_up -> committee_departments_junction (junction_id));
diesel::joinable!(book_junction_bridge -> book_follow_up (book_id));
diesel::joinable!(book_junction_bridge -> committee_departments_junction (junction_id));
diesel::joinable!(committee_departments_junction -> committees (co_id));
diesel::joinable!(committee_departments_junction -> departments (de_id));
diesel::joinable!(pdf_table -> users (user_id));
diesel::joinable!(sessions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    book_follow_up,
    book_junction_bridge,
    committee_departments_junction,
    committees,
    departments,
    pdf_table,
    sessions,
    users,
);
