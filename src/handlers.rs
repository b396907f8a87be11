use crate::{
    AppState, auth,
    auth::Session,
    error::ApiError,
    models::{
        CreateNoteRequest, DeleteResponse, LoginRequest, LoginResponse, Note, Role,
        UpdateNoteRequest,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect},
};

// --- Embedded Pages ---

// Shown to anyone without a valid session. Posts the password as JSON and
// reloads on success so the server re-renders the role-aware home page.
const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Note Portal - Login</title>
    <style>
        body { font-family: sans-serif; max-width: 24rem; margin: 4rem auto; }
        input, button { font-size: 1rem; padding: 0.5rem; }
        .error { color: #b00020; min-height: 1.2rem; }
    </style>
</head>
<body>
    <h1>Note Portal</h1>
    <p>Enter the shared password to continue.</p>
    <form id="loginForm">
        <input type="password" id="password" placeholder="Password" autofocus>
        <button type="submit">Sign in</button>
    </form>
    <p class="error" id="loginError"></p>
    <script>
    document.getElementById('loginForm').addEventListener('submit', async function(e) {
        e.preventDefault();
        const password = document.getElementById('password').value;
        const response = await fetch('/login', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ password })
        });
        if (response.ok) {
            window.location.reload();
        } else {
            const err = await response.json();
            document.getElementById('loginError').textContent = err.error || 'Login failed';
        }
    });
    </script>
</body>
</html>
"#;

// Role-aware notes page. The server substitutes __ROLE__ before serving;
// the script only draws the create/edit/delete controls for admins, while the
// API enforces the same rule server-side.
const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Note Portal</title>
    <style>
        body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }
        .note-card { border: 1px solid #ccc; border-radius: 4px; padding: 0.75rem; margin: 0.5rem 0; }
        .note-actions { float: right; }
        input, textarea, button { font-size: 1rem; padding: 0.4rem; margin: 0.2rem 0; }
        input, textarea { width: 100%; box-sizing: border-box; }
        header { display: flex; justify-content: space-between; align-items: baseline; }
    </style>
</head>
<body>
    <header>
        <h1>Note Portal</h1>
        <span>signed in as <strong>__ROLE__</strong> &middot; <a href="/logout">Log out</a></span>
    </header>
    <div id="editor" style="display: none">
        <input id="noteTitle" placeholder="Title">
        <textarea id="noteContent" rows="3" placeholder="Content"></textarea>
        <button id="saveBtn">Add note</button>
    </div>
    <div id="notesList"></div>
    <script>
    const userRole = '__ROLE__';
    let editingId = null;

    if (userRole === 'admin') {
        document.getElementById('editor').style.display = 'block';
        document.getElementById('saveBtn').addEventListener('click', saveNote);
    }

    loadNotes();

    async function loadNotes() {
        const response = await fetch('/api/notes');
        if (response.status === 401) { window.location.reload(); return; }
        renderNotes(await response.json());
    }

    function renderNotes(notes) {
        const list = document.getElementById('notesList');
        if (notes.length === 0) {
            list.innerHTML = '<p>No notes yet.</p>';
            return;
        }
        list.innerHTML = notes.map(function(note) {
            let actions = '';
            if (userRole === 'admin') {
                actions = '<div class="note-actions">'
                    + '<button onclick="editNote(' + note.id + ')">Edit</button> '
                    + '<button onclick="deleteNote(' + note.id + ')">Delete</button>'
                    + '</div>';
            }
            return '<div class="note-card">' + actions
                + '<h3>' + escapeHtml(note.title) + '</h3>'
                + '<p>' + escapeHtml(note.content) + '</p></div>';
        }).join('');
    }

    async function saveNote() {
        const title = document.getElementById('noteTitle').value.trim();
        const content = document.getElementById('noteContent').value.trim();
        const url = editingId ? '/api/notes/' + editingId : '/api/notes';
        const method = editingId ? 'PUT' : 'POST';
        const response = await fetch(url, {
            method: method,
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ title, content })
        });
        if (response.ok) {
            document.getElementById('noteTitle').value = '';
            document.getElementById('noteContent').value = '';
            editingId = null;
            document.getElementById('saveBtn').textContent = 'Add note';
            loadNotes();
        } else {
            const err = await response.json();
            alert(err.error || 'Save failed');
        }
    }

    window.editNote = async function(id) {
        const response = await fetch('/api/notes');
        const notes = await response.json();
        const note = notes.find(function(n) { return n.id === id; });
        if (note) {
            document.getElementById('noteTitle').value = note.title;
            document.getElementById('noteContent').value = note.content;
            editingId = id;
            document.getElementById('saveBtn').textContent = 'Update note';
        }
    };

    window.deleteNote = async function(id) {
        const response = await fetch('/api/notes/' + id, { method: 'DELETE' });
        if (response.ok) { loadNotes(); }
    };

    function escapeHtml(text) {
        const div = document.createElement('div');
        div.textContent = text;
        return div.innerHTML;
    }
    </script>
</body>
</html>
"#;

// --- Handlers ---

/// home
///
/// [Public Route] Serves the single-page UI. With a valid session the
/// role-aware notes page is rendered; without one (or with an expired or
/// tampered cookie) the login page is served instead of a 401, since this is
/// the entry point a browser lands on.
pub async fn home(session: Option<Session>) -> Html<String> {
    match session {
        Some(session) => Html(HOME_PAGE.replace("__ROLE__", session.role.as_str())),
        None => Html(LOGIN_PAGE.to_string()),
    }
}

/// login
///
/// [Public Route] Resolves the submitted password to a role and creates the
/// session. Admin is matched before reader, so identical configured passwords
/// resolve to admin. A mismatch yields 401 and no Set-Cookie header, leaving
/// any existing session untouched.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session created", body = LoginResponse),
        (status = 401, description = "Invalid password", body = crate::models::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let role =
        auth::resolve_role(&payload.password, &state.config).ok_or(ApiError::InvalidCredentials)?;

    let cookie = auth::issue_session_cookie(role, &state.config)?;

    tracing::info!(%role, "login succeeded");

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            success: true,
            role,
        }),
    ))
}

/// logout
///
/// [Public Route] Destroys the session unconditionally, whether or not one
/// existed, then redirects the browser back to the home page (which will now
/// render the login form).
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Session cleared, redirect to /"))
)]
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, auth::clear_session_cookie())],
        Redirect::to("/"),
    )
}

/// get_notes
///
/// [Session Route] Returns the full current note list for any valid role.
/// A missing notes file reads as an empty list; an unparsable one surfaces as
/// a 500 rather than masquerading as an empty store.
#[utoipa::path(
    get,
    path = "/api/notes",
    responses(
        (status = 200, description = "All notes", body = [Note]),
        (status = 401, description = "No session", body = crate::models::ErrorResponse)
    )
)]
pub async fn get_notes(
    _session: Session,
    State(state): State<AppState>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.store.load().await?;
    Ok(Json(notes))
}

/// create_note
///
/// [Admin Route] Appends a note to the store. The id is assigned as
/// `current count + 1`, matching the persisted format: after a deletion the
/// next id can collide with a surviving note. Missing title/content fields
/// default to empty strings, which the store permits.
#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Created", body = Note),
        (status = 403, description = "Not admin", body = crate::models::ErrorResponse)
    )
)]
pub async fn create_note(
    session: Session,
    State(state): State<AppState>,
    Json(payload): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    auth::require_role(&session, Role::Admin)?;

    let mut notes = state.store.load().await?;

    let note = Note {
        id: notes.len() as i64 + 1,
        title: payload.title,
        content: payload.content,
    };

    notes.push(note.clone());
    state.store.save(&notes).await?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// update_note
///
/// [Admin Route] Partially updates an existing note: only the provided fields
/// are rewritten. Unlike deletion this is not idempotent-by-absence; an
/// unknown id is a 404.
#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    params(("id" = i64, Path, description = "Note ID")),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Updated", body = Note),
        (status = 404, description = "No note with that id", body = crate::models::ErrorResponse)
    )
)]
pub async fn update_note(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    auth::require_role(&session, Role::Admin)?;

    let mut notes = state.store.load().await?;

    // Well-formed stores have at most one match; a store with duplicated ids
    // (possible after deletions, see create_note) updates the first.
    let note = notes
        .iter_mut()
        .find(|note| note.id == id)
        .ok_or(ApiError::NoteNotFound)?;

    if let Some(title) = payload.title {
        note.title = title;
    }
    if let Some(content) = payload.content {
        note.content = content;
    }

    let updated = note.clone();
    state.store.save(&notes).await?;

    Ok(Json(updated))
}

/// delete_note
///
/// [Admin Route] Removes every note matching the id (0 or 1 in well-formed
/// data) and reports success either way. Idempotent: deleting an id that does
/// not exist is not an error.
#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(("id" = i64, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Deleted (or nothing to delete)", body = DeleteResponse),
        (status = 403, description = "Not admin", body = crate::models::ErrorResponse)
    )
)]
pub async fn delete_note(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    auth::require_role(&session, Role::Admin)?;

    let mut notes = state.store.load().await?;
    notes.retain(|note| note.id != id);
    state.store.save(&notes).await?;

    Ok(Json(DeleteResponse { success: true }))
}
