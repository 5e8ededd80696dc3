pub mod sqlite_booking_repo;
pub mod sqlite_room_repo;
pub mod sqlite_teacher_repo;
