//! 选课存储操作

use super::SeaOrmStorage;
use crate::entity::class_bookings::{Column as ClassColumn, Entity as ClassBookings};
use crate::entity::class_enrollments::{ActiveModel, Column, Entity as ClassEnrollments};
use crate::entity::users::{Entity as Users, Relation as UserRelation};
use crate::errors::{ClassroomError, Result};
use crate::models::{
    class_bookings::entities::Enrollment,
    users::entities::{User, UserRole},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait, sea_query::Expr,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 学生选课
    ///
    /// 校验：课程和学生必须存在，用户必须是学生，不能重复选课，
    /// 设置了 max_students 的课程满员后不再接受选课。
    /// 名额检查与插入在同一事务内，事务开始时先锁住课程行，同一课程的选课串行执行。
    pub async fn enroll_student_impl(&self, class_id: i64, student_id: i64) -> Result<Enrollment> {
        let student = self
            .get_user_by_id_impl(student_id)
            .await?
            .ok_or_else(|| ClassroomError::not_found(format!("用户不存在: {student_id}")))?;

        if student.role != UserRole::Student {
            return Err(ClassroomError::validation(format!(
                "只有学生可以选课，用户 {student_id} 的角色为 {}",
                student.role
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassroomError::from_db("开启选课事务失败", e))?;

        // 空更新：SQLite 上拿到写锁，PostgreSQL / MySQL 上锁住该课程行
        ClassBookings::update_many()
            .col_expr(ClassColumn::UpdatedAt, Expr::col(ClassColumn::UpdatedAt))
            .filter(ClassColumn::Id.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| ClassroomError::from_db("锁定课程失败", e))?;

        let class = ClassBookings::find_by_id(class_id)
            .one(&txn)
            .await
            .map_err(|e| ClassroomError::from_db("查询课程失败", e))?
            .ok_or_else(|| ClassroomError::not_found(format!("课程不存在: {class_id}")))?;

        let already_enrolled = ClassEnrollments::find_by_id((class_id, student_id))
            .one(&txn)
            .await
            .map_err(|e| ClassroomError::from_db("查询选课记录失败", e))?
            .is_some();
        if already_enrolled {
            return Err(ClassroomError::conflict(format!(
                "学生 {student_id} 已选课程 {class_id}"
            )));
        }

        if let Some(max_students) = class.max_students {
            let enrolled = ClassEnrollments::find()
                .filter(Column::ClassId.eq(class_id))
                .count(&txn)
                .await
                .map_err(|e| ClassroomError::from_db("统计选课人数失败", e))?;
            if enrolled >= max_students.max(0) as u64 {
                return Err(ClassroomError::conflict(format!(
                    "课程 {class_id} 已满员 ({enrolled}/{max_students})"
                )));
            }
        }

        let model = ActiveModel {
            class_id: Set(class_id),
            student_id: Set(student_id),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| ClassroomError::from_db("选课失败", e))?;

        txn.commit()
            .await
            .map_err(|e| ClassroomError::from_db("提交选课事务失败", e))?;

        debug!("Student {} enrolled in class {}", student_id, class_id);

        Ok(result.into_enrollment())
    }

    /// 退课
    pub async fn unenroll_student_impl(&self, class_id: i64, student_id: i64) -> Result<bool> {
        let result = ClassEnrollments::delete_many()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("退课失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出课程的已选学生
    pub async fn list_enrolled_students_impl(&self, class_id: i64) -> Result<Vec<User>> {
        let users = Users::find()
            .join(JoinType::InnerJoin, UserRelation::ClassEnrollments.def())
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询已选学生失败", e))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 统计课程已选人数
    pub async fn count_enrolled_students_impl(&self, class_id: i64) -> Result<u64> {
        let count = ClassEnrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("统计选课人数失败", e))?;

        Ok(count)
    }

    /// 学生是否已选该课程
    pub async fn is_student_enrolled_impl(&self, class_id: i64, student_id: i64) -> Result<bool> {
        let result = ClassEnrollments::find_by_id((class_id, student_id))
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询选课记录失败", e))?;

        Ok(result.is_some())
    }
}
