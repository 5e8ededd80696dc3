use std::sync::Arc;

use tracing::info;

use crate::domain::models::room::{Room, RoomForm};
use crate::domain::models::teacher::{Teacher, TeacherFields, TeacherForm};
use crate::domain::ports::{RoomRepository, TeacherRepository};
use crate::domain::services::fields::{bounded_text, parse_int, require_all};
use crate::error::{AppError, FormError};

pub const MIN_CAPACITY: i64 = 0;
pub const MAX_CAPACITY: i64 = 100;

/// Returns the room name and capacity, or the first failing check.
pub fn check_room_form(form: &RoomForm) -> Result<(String, i64), FormError> {
    require_all(&[&form.name, &form.capacity])?;

    let name = bounded_text(&form.name, "Room name")?;
    let capacity = parse_int(&form.capacity, "capacity")?;
    if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
        return Err(FormError::CapacityOutOfRange);
    }
    Ok((name, capacity))
}

pub fn check_teacher_fields(form: &TeacherForm) -> Result<TeacherFields, FormError> {
    require_all(&[&form.title, &form.first_name, &form.last_name])?;

    Ok(TeacherFields {
        title: bounded_text(&form.title, "Teacher title")?,
        first_name: bounded_text(&form.first_name, "Teacher first name")?,
        last_name: bounded_text(&form.last_name, "Teacher last name")?,
    })
}

/// Room and teacher administration.
pub struct RosterService {
    rooms: Arc<dyn RoomRepository>,
    teachers: Arc<dyn TeacherRepository>,
}

impl RosterService {
    pub fn new(rooms: Arc<dyn RoomRepository>, teachers: Arc<dyn TeacherRepository>) -> Self {
        Self { rooms, teachers }
    }

    pub async fn add_room(&self, form: &RoomForm) -> Result<Room, FormError> {
        let (name, capacity) = check_room_form(form)?;

        let room = self.rooms.create(&name, capacity).await
            .map_err(|e| FormError::from_persistence(e, FormError::DuplicateName, "adding a room"))?;

        info!("Room added: {} ({}) capacity {}", room.name, room.id, room.capacity);
        Ok(room)
    }

    pub async fn remove_room(&self, id: &Option<String>) -> Result<(), FormError> {
        let id = parse_int(id, "room")?;

        self.rooms.find_by_id(id).await
            .map_err(|e| FormError::unexpected(e, "looking up a room"))?
            .ok_or(FormError::NotFound("room"))?;

        self.rooms.delete(id).await.map_err(|e| match e {
            AppError::NotFound(_) => FormError::NotFound("room"),
            other => FormError::unexpected(other, "removing a room"),
        })?;

        info!("Room removed: {}", id);
        Ok(())
    }

    pub async fn add_teacher(&self, form: &TeacherForm) -> Result<Teacher, FormError> {
        let fields = check_teacher_fields(form)?;

        let teacher = self.teachers.create(&fields).await
            .map_err(|e| FormError::unexpected(e, "adding a teacher"))?;

        info!("Teacher added: {} ({})", teacher.display_name(), teacher.id);
        Ok(teacher)
    }

    pub async fn remove_teacher(&self, id: &Option<String>) -> Result<(), FormError> {
        let id = parse_int(id, "teacher")?;

        self.teachers.find_by_id(id).await
            .map_err(|e| FormError::unexpected(e, "looking up a teacher"))?
            .ok_or(FormError::NotFound("teacher"))?;

        self.teachers.delete(id).await.map_err(|e| match e {
            AppError::NotFound(_) => FormError::NotFound("teacher"),
            other => FormError::unexpected(other, "removing a teacher"),
        })?;

        info!("Teacher removed: {}", id);
        Ok(())
    }

    pub async fn edit_teacher(&self, form: &TeacherForm) -> Result<Teacher, FormError> {
        require_all(&[&form.id, &form.title, &form.first_name, &form.last_name])?;
        let fields = check_teacher_fields(form)?;
        let id = parse_int(&form.id, "id")?;

        self.teachers.find_by_id(id).await
            .map_err(|e| FormError::unexpected(e, "looking up a teacher"))?
            .ok_or(FormError::NotFound("teacher"))?;

        let teacher = self.teachers.update(id, &fields).await.map_err(|e| match e {
            AppError::NotFound(_) => FormError::NotFound("teacher"),
            other => FormError::unexpected(other, "editing a teacher"),
        })?;

        info!("Teacher updated: {} ({})", teacher.display_name(), teacher.id);
        Ok(teacher)
    }
}
